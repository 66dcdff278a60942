//! # Calculator Inputs
//!
//! The cost-input records consumed by the pricing engine. Each record maps
//! to one section of the estimating form; [`CalculatorInputs`] aggregates
//! all seven and is the sole input to
//! [`compute_breakdown`](crate::calculations::compute_breakdown).
//!
//! `Default` on every record yields the industry defaults for a new
//! sealcoating business, which also serve as the "reset" baseline.
//!
//! ## JSON Example
//!
//! Missing records or fields fall back to the defaults, so a partial file
//! is a valid input:
//!
//! ```rust
//! use pricing_core::inputs::CalculatorInputs;
//!
//! let json = r#"{ "volume": { "monthly_job_count": 30 } }"#;
//! let inputs: CalculatorInputs = serde_json::from_str(json).unwrap();
//! assert_eq!(inputs.volume.monthly_job_count, 30.0);
//! assert_eq!(inputs.volume.avg_job_sq_ft, 5000.0);
//! assert_eq!(inputs.materials.sealer_cost_per_gallon, 15.0);
//! ```

pub mod fields;

pub use fields::{field, fields, FieldSpec, Section, Unit};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PricingError, PricingResult};

/// Sealer, additives, crack filler and line paint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialsCosts {
    /// Cost per gallon of sealcoat material
    pub sealer_cost_per_gallon: f64,
    /// Square feet covered per gallon of sealer
    pub coverage_rate_per_gallon: f64,
    /// Sand, latex, polymer etc. per gallon of sealer mixed
    pub additives_cost_per_gallon: f64,
    /// Crack filler cost per linear foot
    pub crack_filler_cost_per_linear_ft: f64,
    /// Linear feet of cracks filled on an average job
    pub avg_crack_ft_per_job: f64,
    /// Line striping materials per job
    pub line_paint_cost_per_job: f64,
}

impl Default for MaterialsCosts {
    fn default() -> Self {
        MaterialsCosts {
            sealer_cost_per_gallon: 15.0,
            coverage_rate_per_gallon: 80.0,
            additives_cost_per_gallon: 3.0,
            crack_filler_cost_per_linear_ft: 0.5,
            avg_crack_ft_per_job: 200.0,
            line_paint_cost_per_job: 75.0,
        }
    }
}

/// Crew wages and payroll burden.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaborCosts {
    /// Workers on a typical job
    pub crew_size: f64,
    /// Average hourly pay per crew member
    pub hourly_wage_per_worker: f64,
    /// Hours per job including setup and cleanup
    pub avg_job_time_hours: f64,
    /// Job area used to spread labor cost.
    ///
    /// Independent of [`VolumeEstimate::avg_job_sq_ft`]; use
    /// [`CalculatorInputs::set_avg_job_sq_ft`] to keep the two in step.
    pub avg_job_sq_ft: f64,
    /// Employer payroll taxes, percent of gross wages (15 = 15%)
    pub payroll_tax_rate: f64,
    /// Workers compensation rate, percent of payroll
    pub workers_comp_rate: f64,
}

impl LaborCosts {
    /// Crew size × wage × hours, before payroll burden
    pub fn base_labor_per_job(&self) -> f64 {
        self.crew_size * self.hourly_wage_per_worker * self.avg_job_time_hours
    }

    /// 1 + payroll tax + workers comp, both given in percent
    pub fn tax_multiplier(&self) -> f64 {
        1.0 + self.payroll_tax_rate / 100.0 + self.workers_comp_rate / 100.0
    }

    /// Fully burdened labor cost of one job
    pub fn loaded_labor_per_job(&self) -> f64 {
        self.base_labor_per_job() * self.tax_multiplier()
    }
}

impl Default for LaborCosts {
    fn default() -> Self {
        LaborCosts {
            crew_size: 3.0,
            hourly_wage_per_worker: 18.0,
            avg_job_time_hours: 4.0,
            avg_job_sq_ft: 5000.0,
            payroll_tax_rate: 15.0,
            workers_comp_rate: 8.0,
        }
    }
}

/// Monthly equipment payments and upkeep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentCosts {
    pub truck_payment: f64,
    pub spray_rig_payment: f64,
    /// Blowers, edgers, crack fill machines, stripers
    pub other_equipment_payment: f64,
    pub maintenance_budget: f64,
}

impl EquipmentCosts {
    /// Sum of all monthly equipment costs
    pub fn monthly_total(&self) -> f64 {
        self.truck_payment + self.spray_rig_payment + self.other_equipment_payment + self.maintenance_budget
    }
}

impl Default for EquipmentCosts {
    fn default() -> Self {
        EquipmentCosts {
            truck_payment: 650.0,
            spray_rig_payment: 400.0,
            other_equipment_payment: 150.0,
            maintenance_budget: 200.0,
        }
    }
}

/// Monthly operating overhead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverheadCosts {
    pub general_liability_insurance: f64,
    pub auto_insurance: f64,
    /// Fixed monthly premium, separate from the payroll-based rate
    pub workers_comp_insurance: f64,
    pub fuel_costs: f64,
    pub marketing_budget: f64,
    pub phone_software_office: f64,
    pub uniforms_safety_gear: f64,
    pub storage_yard_rental: f64,
}

impl OverheadCosts {
    /// Sum of all monthly overhead costs
    pub fn monthly_total(&self) -> f64 {
        self.general_liability_insurance
            + self.auto_insurance
            + self.workers_comp_insurance
            + self.fuel_costs
            + self.marketing_budget
            + self.phone_software_office
            + self.uniforms_safety_gear
            + self.storage_yard_rental
    }
}

impl Default for OverheadCosts {
    fn default() -> Self {
        OverheadCosts {
            general_liability_insurance: 250.0,
            auto_insurance: 200.0,
            workers_comp_insurance: 300.0,
            fuel_costs: 600.0,
            marketing_budget: 500.0,
            phone_software_office: 200.0,
            uniforms_safety_gear: 75.0,
            storage_yard_rental: 300.0,
        }
    }
}

/// Monthly debt service. All zero by default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanCosts {
    pub sba_loan_payment: f64,
    pub equipment_financing: f64,
    pub line_of_credit_payment: f64,
    pub other_debt_service: f64,
}

impl LoanCosts {
    /// Sum of all monthly loan payments
    pub fn monthly_total(&self) -> f64 {
        self.sba_loan_payment + self.equipment_financing + self.line_of_credit_payment + self.other_debt_service
    }
}

/// What the owner takes home each month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerSalary {
    pub monthly_salary: f64,
}

impl OwnerSalary {
    pub fn monthly_total(&self) -> f64 {
        self.monthly_salary
    }
}

impl Default for OwnerSalary {
    fn default() -> Self {
        OwnerSalary { monthly_salary: 6000.0 }
    }
}

/// Expected monthly workload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeEstimate {
    pub monthly_job_count: f64,
    /// Job area used for per-job material costs and monthly volume
    pub avg_job_sq_ft: f64,
}

impl VolumeEstimate {
    /// Jobs per month × average job area
    pub fn monthly_sq_ft(&self) -> f64 {
        self.monthly_job_count * self.avg_job_sq_ft
    }
}

impl Default for VolumeEstimate {
    fn default() -> Self {
        VolumeEstimate {
            monthly_job_count: 20.0,
            avg_job_sq_ft: 5000.0,
        }
    }
}

/// Aggregate of every cost-input record.
///
/// A plain value: build it, hand it to the engine, throw it away. Nothing
/// here enforces that `labor.avg_job_sq_ft == volume.avg_job_sq_ft`; see
/// [`job_area_mismatch`](Self::job_area_mismatch).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorInputs {
    pub materials: MaterialsCosts,
    pub labor: LaborCosts,
    pub equipment: EquipmentCosts,
    pub overhead: OverheadCosts,
    pub loans: LoanCosts,
    pub owner_salary: OwnerSalary,
    pub volume: VolumeEstimate,
}

impl CalculatorInputs {
    /// The documented industry-default input set.
    pub fn industry_defaults() -> Self {
        Self::default()
    }

    /// Parse inputs from JSON; missing fields take their defaults.
    ///
    /// A document that gives `volume.avg_job_sq_ft` but not
    /// `labor.avg_job_sq_ft` applies it to both, as [`set`](Self::set) does.
    pub fn from_json_str(text: &str) -> PricingResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let has_area = |record: &str| value.get(record).and_then(|r| r.get("avg_job_sq_ft")).is_some();
        let (volume_area, labor_area) = (has_area("volume"), has_area("labor"));

        let mut inputs: CalculatorInputs = serde_json::from_value(value)?;
        if volume_area && !labor_area {
            debug!(sq_ft = inputs.volume.avg_job_sq_ft, "labor job area taken from volume");
            inputs.labor.avg_job_sq_ft = inputs.volume.avg_job_sq_ft;
        }
        Ok(inputs)
    }

    /// Write the same job area into both the labor and volume records.
    pub fn set_avg_job_sq_ft(&mut self, sq_ft: f64) {
        self.labor.avg_job_sq_ft = sq_ft;
        self.volume.avg_job_sq_ft = sq_ft;
    }

    /// Returns `(labor, volume)` job areas when they disagree.
    pub fn job_area_mismatch(&self) -> Option<(f64, f64)> {
        let labor = self.labor.avg_job_sq_ft;
        let volume = self.volume.avg_job_sq_ft;
        if labor == volume {
            None
        } else {
            Some((labor, volume))
        }
    }

    /// Read a leaf field by its dotted key (e.g. `"labor.crew_size"`).
    pub fn get(&self, key: &str) -> PricingResult<f64> {
        Ok((field(key)?.get)(self))
    }

    /// Clamp `value` into the field's range and store it.
    ///
    /// Returns the value actually stored. Setting `volume.avg_job_sq_ft`
    /// also updates `labor.avg_job_sq_ft`.
    pub fn set(&mut self, key: &str, value: f64) -> PricingResult<f64> {
        let spec = field(key)?;
        let stored = spec.clamp(value);
        if stored != value {
            debug!(field = key, requested = value, stored, "clamped input value");
        }
        (spec.set)(self, stored);
        Ok(stored)
    }

    /// Check every field is finite and non-negative.
    ///
    /// Reports the first offending field in form order.
    pub fn validate(&self) -> PricingResult<()> {
        for spec in fields() {
            let value = (spec.get)(self);
            if !value.is_finite() {
                return Err(PricingError::invalid_input(spec.key, value.to_string(), "Value must be finite"));
            }
            if value < 0.0 {
                return Err(PricingError::invalid_input(spec.key, value.to_string(), "Value cannot be negative"));
            }
        }
        Ok(())
    }

    /// Copy of these inputs with every field clamped into its range.
    ///
    /// Unlike [`set`](Self::set) this does not sync the job areas; each
    /// field is clamped on its own.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for spec in fields() {
            let value = (spec.get)(self);
            let stored = spec.clamp(value);
            if stored != value {
                debug!(field = spec.key, requested = value, stored, "clamped input value");
            }
            (spec.set)(&mut out, stored);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let inputs = CalculatorInputs::default();
        assert_eq!(inputs.materials.sealer_cost_per_gallon, 15.0);
        assert_eq!(inputs.labor.crew_size, 3.0);
        assert_eq!(inputs.owner_salary.monthly_salary, 6000.0);
        assert_eq!(inputs.loans.monthly_total(), 0.0);
        assert_eq!(inputs.job_area_mismatch(), None);
    }

    #[test]
    fn test_section_subtotals() {
        let inputs = CalculatorInputs::default();
        assert_eq!(inputs.equipment.monthly_total(), 1400.0);
        assert_eq!(inputs.overhead.monthly_total(), 2425.0);
        assert_eq!(inputs.owner_salary.monthly_total(), 6000.0);
        assert_eq!(inputs.volume.monthly_sq_ft(), 100_000.0);
    }

    #[test]
    fn test_labor_helpers() {
        let labor = LaborCosts::default();
        // 3 × 18 × 4 = 216
        assert_eq!(labor.base_labor_per_job(), 216.0);
        assert!((labor.tax_multiplier() - 1.23).abs() < 1e-12);
        assert!((labor.loaded_labor_per_job() - 265.68).abs() < 1e-9);
    }

    #[test]
    fn test_set_avg_job_sq_ft_syncs() {
        let mut inputs = CalculatorInputs::default();
        inputs.set_avg_job_sq_ft(8000.0);
        assert_eq!(inputs.labor.avg_job_sq_ft, 8000.0);
        assert_eq!(inputs.volume.avg_job_sq_ft, 8000.0);

        inputs.labor.avg_job_sq_ft = 6000.0;
        assert_eq!(inputs.job_area_mismatch(), Some((6000.0, 8000.0)));
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut inputs = CalculatorInputs::default();
        assert_eq!(inputs.get("equipment.truck_payment").unwrap(), 650.0);

        let stored = inputs.set("equipment.truck_payment", 900.0).unwrap();
        assert_eq!(stored, 900.0);
        assert_eq!(inputs.equipment.truck_payment, 900.0);
    }

    #[test]
    fn test_set_clamps() {
        let mut inputs = CalculatorInputs::default();
        assert_eq!(inputs.set("labor.crew_size", 50.0).unwrap(), 20.0);
        assert_eq!(inputs.set("overhead.fuel_costs", -10.0).unwrap(), 0.0);
        assert_eq!(inputs.set("volume.monthly_job_count", f64::NAN).unwrap(), 1.0);
    }

    #[test]
    fn test_set_volume_job_area_syncs_labor() {
        let mut inputs = CalculatorInputs::default();
        inputs.set("volume.avg_job_sq_ft", 12_000.0).unwrap();
        assert_eq!(inputs.labor.avg_job_sq_ft, 12_000.0);

        inputs.set("labor.avg_job_sq_ft", 3000.0).unwrap();
        assert_eq!(inputs.volume.avg_job_sq_ft, 12_000.0);
    }

    #[test]
    fn test_unknown_key() {
        let mut inputs = CalculatorInputs::default();
        let err = inputs.set("materials.gold_leaf", 1.0).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_FIELD");
        assert!(inputs.get("nope").is_err());
    }

    #[test]
    fn test_validate() {
        let mut inputs = CalculatorInputs::default();
        assert!(inputs.validate().is_ok());

        inputs.labor.hourly_wage_per_worker = -18.0;
        match inputs.validate() {
            Err(PricingError::InvalidInput { field, .. }) => {
                assert_eq!(field, "labor.hourly_wage_per_worker")
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }

        let mut inputs = CalculatorInputs::default();
        inputs.overhead.fuel_costs = f64::INFINITY;
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn test_zero_volume_is_valid() {
        let mut inputs = CalculatorInputs::default();
        inputs.volume.monthly_job_count = 0.0;
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_clamped() {
        let mut inputs = CalculatorInputs::default();
        inputs.labor.hourly_wage_per_worker = -5.0;
        inputs.materials.coverage_rate_per_gallon = 1000.0;
        inputs.volume.monthly_job_count = 0.0;

        let clamped = inputs.clamped();
        assert_eq!(clamped.labor.hourly_wage_per_worker, 0.0);
        assert_eq!(clamped.materials.coverage_rate_per_gallon, 200.0);
        assert_eq!(clamped.volume.monthly_job_count, 1.0);
        // untouched fields survive
        assert_eq!(clamped.equipment, inputs.equipment);
        assert!(clamped.validate().is_ok());
    }

    #[test]
    fn test_serialization() {
        let inputs = CalculatorInputs::default();
        let json = serde_json::to_string_pretty(&inputs).unwrap();
        assert!(json.contains("\"sealer_cost_per_gallon\": 15.0"));
        assert!(json.contains("\"owner_salary\""));

        let roundtrip: CalculatorInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(inputs, roundtrip);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "loans": { "sba_loan_payment": 800 }, "labor": { "crew_size": 4 } }"#;
        let inputs: CalculatorInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.loans.sba_loan_payment, 800.0);
        assert_eq!(inputs.loans.equipment_financing, 0.0);
        assert_eq!(inputs.labor.crew_size, 4.0);
        assert_eq!(inputs.labor.hourly_wage_per_worker, 18.0);
        assert_eq!(inputs.overhead, OverheadCosts::default());
    }

    #[test]
    fn test_from_json_syncs_volume_job_area() {
        let inputs = CalculatorInputs::from_json_str(r#"{ "volume": { "avg_job_sq_ft": 8000 } }"#).unwrap();
        assert_eq!(inputs.volume.avg_job_sq_ft, 8000.0);
        assert_eq!(inputs.labor.avg_job_sq_ft, 8000.0);
        assert_eq!(inputs.job_area_mismatch(), None);

        let both = r#"{ "volume": { "avg_job_sq_ft": 8000 }, "labor": { "avg_job_sq_ft": 6000 } }"#;
        let inputs = CalculatorInputs::from_json_str(both).unwrap();
        assert_eq!(inputs.job_area_mismatch(), Some((6000.0, 8000.0)));

        let labor_only = CalculatorInputs::from_json_str(r#"{ "labor": { "avg_job_sq_ft": 6000 } }"#).unwrap();
        assert_eq!(labor_only.volume.avg_job_sq_ft, 5000.0);
        assert_eq!(labor_only.labor.avg_job_sq_ft, 6000.0);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = CalculatorInputs::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
