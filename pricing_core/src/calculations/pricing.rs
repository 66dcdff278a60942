//! # Price Breakdown
//!
//! Derives a per-square-foot cost breakdown and the price that protects a
//! target net margin.
//!
//! ## Method
//!
//! - **Variable costs** (materials, labor) are normalized per job and
//!   divided by job area.
//! - **Fixed costs** (equipment, overhead, loans, owner salary) are monthly
//!   totals spread over monthly volume. The volume denominator is floored
//!   at 1 sq ft so zero volume never divides by zero; near-zero volume
//!   therefore understates fixed cost per sq ft.
//! - **Price** uses margin-on-price: `price = cost / (1 - margin)`, so the
//!   margin is a share of revenue. This is not markup (`cost × (1 + m)`).
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::pricing::{calculate, compute_breakdown};
//! use pricing_core::inputs::CalculatorInputs;
//!
//! let inputs = CalculatorInputs::default();
//! let breakdown = compute_breakdown(&inputs, 0.40);
//! assert!((breakdown.material_cost_per_sq_ft - 0.26).abs() < 1e-12);
//!
//! // Checked entry point rejects an undefined margin
//! assert!(calculate(&inputs, 1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::PricingResult;
use crate::inputs::CalculatorInputs;
use crate::margin::TargetMargin;

/// The six cost components, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    Materials,
    Labor,
    Equipment,
    Overhead,
    Loans,
    OwnerPay,
}

impl CostCategory {
    pub const ALL: [CostCategory; 6] = [
        CostCategory::Materials,
        CostCategory::Labor,
        CostCategory::Equipment,
        CostCategory::Overhead,
        CostCategory::Loans,
        CostCategory::OwnerPay,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CostCategory::Materials => "Materials",
            CostCategory::Labor => "Labor",
            CostCategory::Equipment => "Equipment",
            CostCategory::Overhead => "Overhead",
            CostCategory::Loans => "Loans",
            CostCategory::OwnerPay => "Owner Pay",
        }
    }

    /// Fixed costs are allocated over monthly volume
    pub fn is_fixed(&self) -> bool {
        !matches!(self, CostCategory::Materials | CostCategory::Labor)
    }
}

/// Result of a pricing calculation. All `*_per_sq_ft` values are currency
/// per square foot; monthly figures are currency per month.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material_cost_per_sq_ft": 0.26,
///   "labor_cost_per_sq_ft": 0.053136,
///   "equipment_cost_per_sq_ft": 0.014,
///   "overhead_cost_per_sq_ft": 0.02425,
///   "loan_cost_per_sq_ft": 0.0,
///   "owner_salary_cost_per_sq_ft": 0.06,
///   "total_cost_per_sq_ft": 0.411386,
///   "margin_per_sq_ft": 0.27425733,
///   "recommended_price_per_sq_ft": 0.68564333,
///   "monthly_sq_ft": 100000.0,
///   "monthly_revenue": 68564.33,
///   "monthly_profit": 27425.73,
///   "margin_percent": 40.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub material_cost_per_sq_ft: f64,
    pub labor_cost_per_sq_ft: f64,
    pub equipment_cost_per_sq_ft: f64,
    pub overhead_cost_per_sq_ft: f64,
    pub loan_cost_per_sq_ft: f64,
    pub owner_salary_cost_per_sq_ft: f64,
    /// Sum of the six components above
    pub total_cost_per_sq_ft: f64,
    /// `recommended_price_per_sq_ft - total_cost_per_sq_ft`
    pub margin_per_sq_ft: f64,
    pub recommended_price_per_sq_ft: f64,
    /// Jobs per month × average job area (not floored)
    pub monthly_sq_ft: f64,
    pub monthly_revenue: f64,
    pub monthly_profit: f64,
    /// Target margin × 100
    pub margin_percent: f64,
}

impl CostBreakdown {
    /// Per-sq-ft value of one component
    pub fn component(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Materials => self.material_cost_per_sq_ft,
            CostCategory::Labor => self.labor_cost_per_sq_ft,
            CostCategory::Equipment => self.equipment_cost_per_sq_ft,
            CostCategory::Overhead => self.overhead_cost_per_sq_ft,
            CostCategory::Loans => self.loan_cost_per_sq_ft,
            CostCategory::OwnerPay => self.owner_salary_cost_per_sq_ft,
        }
    }

    /// All six components in display order
    pub fn components(&self) -> [(CostCategory, f64); 6] {
        CostCategory::ALL.map(|c| (c, self.component(c)))
    }

    /// Largest single component; the scale for cost bars
    pub fn largest_component(&self) -> f64 {
        self.components()
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Component relative to the largest one, 0.0 when nothing costs anything
    pub fn bar_fraction(&self, category: CostCategory) -> f64 {
        let largest = self.largest_component();
        if largest > 0.0 {
            self.component(category) / largest
        } else {
            0.0
        }
    }

    /// Total cost of a month's work ("All Costs")
    pub fn monthly_cost(&self) -> f64 {
        self.total_cost_per_sq_ft * self.monthly_sq_ft
    }

    /// Monthly spend on materials at the estimated volume
    pub fn monthly_material_cost(&self) -> f64 {
        self.material_cost_per_sq_ft * self.monthly_sq_ft
    }

    /// Monthly spend on labor at the estimated volume
    pub fn monthly_labor_cost(&self) -> f64 {
        self.labor_cost_per_sq_ft * self.monthly_sq_ft
    }
}

/// Compute the cost breakdown and recommended price.
///
/// Pure and total: never panics, never allocates, and the same inputs
/// always give bit-identical output.
///
/// `target_margin` should lie in (0, 1). At 1 the price is infinite (or
/// NaN when cost is zero); above 1 it is negative. Neither case is
/// special-cased here; use [`calculate`] or [`TargetMargin`] to reject them.
///
/// Material costs are spread over `volume.avg_job_sq_ft`, labor over
/// `labor.avg_job_sq_ft`. The two are not required to match.
pub fn compute_breakdown(inputs: &CalculatorInputs, target_margin: f64) -> CostBreakdown {
    let CalculatorInputs {
        materials,
        labor,
        equipment,
        overhead,
        loans,
        owner_salary,
        volume,
    } = inputs;

    let monthly_sq_ft = volume.monthly_sq_ft();

    // Variable costs (per sq ft)
    let sealer_per_sq_ft = materials.sealer_cost_per_gallon / materials.coverage_rate_per_gallon;
    let additives_per_sq_ft = materials.additives_cost_per_gallon / materials.coverage_rate_per_gallon;
    let crack_filler_per_job = materials.crack_filler_cost_per_linear_ft * materials.avg_crack_ft_per_job;
    let crack_filler_per_sq_ft = crack_filler_per_job / volume.avg_job_sq_ft;
    let line_paint_per_sq_ft = materials.line_paint_cost_per_job / volume.avg_job_sq_ft;
    let material_cost_per_sq_ft =
        sealer_per_sq_ft + additives_per_sq_ft + crack_filler_per_sq_ft + line_paint_per_sq_ft;

    let labor_cost_per_sq_ft = labor.loaded_labor_per_job() / labor.avg_job_sq_ft;

    // Fixed costs (monthly -> per sq ft)
    let safe_monthly_sq_ft = monthly_sq_ft.max(1.0);
    let equipment_cost_per_sq_ft = equipment.monthly_total() / safe_monthly_sq_ft;
    let overhead_cost_per_sq_ft = overhead.monthly_total() / safe_monthly_sq_ft;
    let loan_cost_per_sq_ft = loans.monthly_total() / safe_monthly_sq_ft;
    let owner_salary_cost_per_sq_ft = owner_salary.monthly_total() / safe_monthly_sq_ft;

    let total_cost_per_sq_ft = material_cost_per_sq_ft
        + labor_cost_per_sq_ft
        + equipment_cost_per_sq_ft
        + overhead_cost_per_sq_ft
        + loan_cost_per_sq_ft
        + owner_salary_cost_per_sq_ft;

    let recommended_price_per_sq_ft = total_cost_per_sq_ft / (1.0 - target_margin);
    let margin_per_sq_ft = recommended_price_per_sq_ft - total_cost_per_sq_ft;

    CostBreakdown {
        material_cost_per_sq_ft,
        labor_cost_per_sq_ft,
        equipment_cost_per_sq_ft,
        overhead_cost_per_sq_ft,
        loan_cost_per_sq_ft,
        owner_salary_cost_per_sq_ft,
        total_cost_per_sq_ft,
        margin_per_sq_ft,
        recommended_price_per_sq_ft,
        monthly_sq_ft,
        monthly_revenue: recommended_price_per_sq_ft * monthly_sq_ft,
        monthly_profit: margin_per_sq_ft * monthly_sq_ft,
        margin_percent: target_margin * 100.0,
    }
}

/// Validate inputs and margin, then compute the breakdown.
///
/// # Returns
///
/// * `Ok(CostBreakdown)` - Calculation results
/// * `Err(PricingError::InvalidMargin)` - margin outside (0, 1)
/// * `Err(PricingError::InvalidInput)` - a negative or non-finite field
pub fn calculate(inputs: &CalculatorInputs, target_margin: f64) -> PricingResult<CostBreakdown> {
    let margin = TargetMargin::new(target_margin)?;
    inputs.validate()?;
    Ok(compute_breakdown(inputs, margin.fraction()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PricingError;
    use crate::inputs::fields;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn assert_identities(b: &CostBreakdown) {
        let sum: f64 = b.components().iter().map(|(_, v)| v).sum();
        assert_close(b.total_cost_per_sq_ft, sum);
        assert_close(b.recommended_price_per_sq_ft - b.total_cost_per_sq_ft, b.margin_per_sq_ft);
        assert_close(b.monthly_revenue, b.recommended_price_per_sq_ft * b.monthly_sq_ft);
        assert_close(b.monthly_profit, b.margin_per_sq_ft * b.monthly_sq_ft);
    }

    #[test]
    fn test_default_materials() {
        let b = compute_breakdown(&CalculatorInputs::default(), 0.40);
        // 15/80 + 3/80 + (0.5 × 200)/5000 + 75/5000 = 0.1875 + 0.0375 + 0.02 + 0.015
        assert_close(b.material_cost_per_sq_ft, 0.26);
    }

    #[test]
    fn test_default_labor() {
        let b = compute_breakdown(&CalculatorInputs::default(), 0.40);
        // 3 × 18 × 4 = 216; × 1.23 = 265.68; / 5000
        assert_close(b.labor_cost_per_sq_ft, 0.053136);
    }

    #[test]
    fn test_default_fixed_costs() {
        let b = compute_breakdown(&CalculatorInputs::default(), 0.40);
        assert_eq!(b.monthly_sq_ft, 100_000.0);
        assert_close(b.equipment_cost_per_sq_ft, 1400.0 / 100_000.0);
        assert_close(b.overhead_cost_per_sq_ft, 2425.0 / 100_000.0);
        assert_eq!(b.loan_cost_per_sq_ft, 0.0);
        assert_close(b.owner_salary_cost_per_sq_ft, 0.06);
    }

    #[test]
    fn test_default_scenario() {
        let b = compute_breakdown(&CalculatorInputs::default(), 0.40);
        let total = 0.26 + 0.053136 + 0.014 + 0.02425 + 0.0 + 0.06;
        assert_close(b.total_cost_per_sq_ft, total);
        assert_close(b.recommended_price_per_sq_ft, total / 0.6);
        assert_close(b.margin_per_sq_ft, total / 0.6 - total);
        assert!((b.monthly_revenue - 68_564.333_333).abs() < 1e-3);
        assert!((b.monthly_profit - 27_425.733_333).abs() < 1e-3);
        assert_eq!(b.margin_percent, 40.0);
        assert_identities(&b);
    }

    #[test]
    fn test_identities_hold_across_margins_and_volumes() {
        for &margin in &[0.10, 0.25, 0.40, 0.60, 0.95] {
            for &jobs in &[0.0, 1.0, 7.0, 20.0, 150.0] {
                let mut inputs = CalculatorInputs::default();
                inputs.volume.monthly_job_count = jobs;
                inputs.loans.sba_loan_payment = 350.0;
                let b = compute_breakdown(&inputs, margin);
                assert_identities(&b);
                assert!(b.margin_per_sq_ft >= 0.0);
            }
        }
    }

    #[test]
    fn test_margin_on_price_not_markup() {
        let b = compute_breakdown(&CalculatorInputs::default(), 0.40);
        // (price - cost) / price == margin
        let realized = b.margin_per_sq_ft / b.recommended_price_per_sq_ft;
        assert_close(realized, 0.40);
        assert!(b.recommended_price_per_sq_ft > b.total_cost_per_sq_ft * 1.40);
    }

    #[test]
    fn test_fixed_cost_monotonicity() {
        let base_inputs = CalculatorInputs::default();
        let base = compute_breakdown(&base_inputs, 0.40);

        let fixed = fields().iter().filter(|f| {
            f.key.starts_with("equipment.")
                || f.key.starts_with("overhead.")
                || f.key.starts_with("loans.")
                || f.key.starts_with("owner_salary.")
        });

        let mut checked = 0;
        for spec in fixed {
            let mut inputs = base_inputs;
            (spec.set)(&mut inputs, (spec.get)(&base_inputs) + 100.0);
            let b = compute_breakdown(&inputs, 0.40);
            assert!(b.total_cost_per_sq_ft > base.total_cost_per_sq_ft, "{}", spec.key);
            assert!(
                b.recommended_price_per_sq_ft > base.recommended_price_per_sq_ft,
                "{}",
                spec.key
            );
            checked += 1;
        }
        assert_eq!(checked, 17);
    }

    #[test]
    fn test_margin_monotonicity() {
        let inputs = CalculatorInputs::default();
        let mut previous = 0.0;
        for pct in 1..100 {
            let b = compute_breakdown(&inputs, pct as f64 / 100.0);
            assert!(b.recommended_price_per_sq_ft > previous, "margin {}%", pct);
            previous = b.recommended_price_per_sq_ft;
        }
    }

    #[test]
    fn test_zero_job_count() {
        let mut inputs = CalculatorInputs::default();
        inputs.volume.monthly_job_count = 0.0;
        let b = compute_breakdown(&inputs, 0.40);

        assert_eq!(b.monthly_sq_ft, 0.0);
        // fixed costs divided by the floored denominator of 1
        assert_eq!(b.equipment_cost_per_sq_ft, 1400.0);
        assert_eq!(b.overhead_cost_per_sq_ft, 2425.0);
        assert_eq!(b.owner_salary_cost_per_sq_ft, 6000.0);
        assert_eq!(b.monthly_revenue, 0.0);
        assert_eq!(b.monthly_profit, 0.0);
        assert!(b.recommended_price_per_sq_ft.is_finite());
    }

    #[test]
    fn test_zero_volume_job_area() {
        let mut inputs = CalculatorInputs::default();
        inputs.volume.avg_job_sq_ft = 0.0;
        let b = compute_breakdown(&inputs, 0.40);

        assert_eq!(b.monthly_sq_ft, 0.0);
        assert_eq!(b.equipment_cost_per_sq_ft, 1400.0);
        // per-job material terms divide by the raw job area
        assert!(b.material_cost_per_sq_ft.is_infinite());
        assert!(b.labor_cost_per_sq_ft.is_finite());

        // the boundary clamp keeps the job area at its 100 sq ft minimum
        let clamped = compute_breakdown(&inputs.clamped(), 0.40);
        assert!(clamped.recommended_price_per_sq_ft.is_finite());
        assert_eq!(clamped.monthly_sq_ft, 2000.0);
    }

    #[test]
    fn test_job_areas_are_independent() {
        let mut inputs = CalculatorInputs::default();
        inputs.labor.avg_job_sq_ft = 2500.0;
        let b = compute_breakdown(&inputs, 0.40);
        // labor doubles, materials unchanged
        assert_close(b.labor_cost_per_sq_ft, 0.106272);
        assert_close(b.material_cost_per_sq_ft, 0.26);
    }

    #[test]
    fn test_undefined_margins_do_not_panic() {
        let inputs = CalculatorInputs::default();

        let at_one = compute_breakdown(&inputs, 1.0);
        assert!(at_one.recommended_price_per_sq_ft.is_infinite());

        let above = compute_breakdown(&inputs, 1.5);
        assert!(above.recommended_price_per_sq_ft < 0.0);
        assert!(above.margin_per_sq_ft < 0.0);

        let mut free = CalculatorInputs::default();
        for spec in fields().iter().filter(|f| f.unit.is_currency()) {
            (spec.set)(&mut free, 0.0);
        }
        let zero_cost = compute_breakdown(&free, 1.0);
        assert_eq!(zero_cost.total_cost_per_sq_ft, 0.0);
        assert!(zero_cost.recommended_price_per_sq_ft.is_nan());
    }

    #[test]
    fn test_negative_inputs_propagate() {
        let mut inputs = CalculatorInputs::default();
        inputs.labor.hourly_wage_per_worker = -18.0;
        let b = compute_breakdown(&inputs, 0.40);
        assert_close(b.labor_cost_per_sq_ft, -0.053136);
        assert_identities(&b);
    }

    #[test]
    fn test_deterministic() {
        let inputs = CalculatorInputs::default();
        let a = compute_breakdown(&inputs, 0.37);
        let b = compute_breakdown(&inputs, 0.37);
        assert_eq!(a, b);
    }

    #[test]
    fn test_calculate_rejects_bad_margin() {
        let inputs = CalculatorInputs::default();
        for margin in [0.0, 1.0, 1.2, -0.1] {
            match calculate(&inputs, margin) {
                Err(PricingError::InvalidMargin { .. }) => {}
                other => panic!("margin {}: expected InvalidMargin, got {:?}", margin, other),
            }
        }
    }

    #[test]
    fn test_calculate_rejects_negative_input() {
        let mut inputs = CalculatorInputs::default();
        inputs.overhead.fuel_costs = -1.0;
        let err = calculate(&inputs, 0.40).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_calculate_matches_engine() {
        let inputs = CalculatorInputs::default();
        assert_eq!(calculate(&inputs, 0.40).unwrap(), compute_breakdown(&inputs, 0.40));
    }

    #[test]
    fn test_component_helpers() {
        let b = compute_breakdown(&CalculatorInputs::default(), 0.40);
        assert_eq!(b.largest_component(), b.material_cost_per_sq_ft);
        assert_eq!(b.bar_fraction(CostCategory::Materials), 1.0);
        assert_eq!(b.bar_fraction(CostCategory::Loans), 0.0);
        assert_close(b.monthly_cost(), b.total_cost_per_sq_ft * 100_000.0);
        assert_close(b.monthly_material_cost(), 26_000.0);
        assert_close(b.monthly_labor_cost(), 5_313.6);
        assert_eq!(b.component(CostCategory::OwnerPay), b.owner_salary_cost_per_sq_ft);
        assert!(CostCategory::Loans.is_fixed());
        assert!(!CostCategory::Labor.is_fixed());
    }

    #[test]
    fn test_result_serialization() {
        let b = compute_breakdown(&CalculatorInputs::default(), 0.40);
        let json = serde_json::to_string(&b).unwrap();
        assert!(json.contains("recommended_price_per_sq_ft"));
        assert!(json.contains("\"margin_percent\":40.0"));
        let roundtrip: CostBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(b, roundtrip);
    }
}
