//! Plain-text rendering of a breakdown, laid out like the results panel:
//! headline price, key metrics, cost bars, monthly volume, section totals.

use pricing_core::format::{format_area, format_percent};
use pricing_core::inputs::{fields, FieldSpec, Section};
use pricing_core::{CalculatorInputs, CostBreakdown, PricingSettings};

const RULE: &str = "═══════════════════════════════════════════════";
const BAR_WIDTH: usize = 24;

/// Render the full results report.
pub fn render_breakdown(breakdown: &CostBreakdown, inputs: &CalculatorInputs, settings: &PricingSettings) -> String {
    let money = settings.currency();
    let price_dp = settings.price_decimals;
    let component_dp = settings.component_decimals;
    let margin = format_percent(breakdown.margin_percent);

    let mut lines = vec![
        RULE.to_string(),
        "  RECOMMENDED PRICE".to_string(),
        RULE.to_string(),
        format!("  {}/sqft", money.fixed(breakdown.recommended_price_per_sq_ft, price_dp)),
        format!("  This price protects a {} net margin after all costs", margin),
        String::new(),
        format!("  Total Cost:      {}/sqft", money.fixed(breakdown.total_cost_per_sq_ft, price_dp)),
        format!("  Margin:          {}/sqft", money.fixed(breakdown.margin_per_sq_ft, price_dp)),
        format!("  Monthly Revenue: {}", money.whole(breakdown.monthly_revenue)),
        format!("  Monthly Profit:  {}", money.whole(breakdown.monthly_profit)),
        String::new(),
        "Cost Breakdown:".to_string(),
    ];

    for (category, value) in breakdown.components() {
        lines.push(format!(
            "  {:<10} {:>12}/sqft  {}",
            category.label(),
            money.fixed(value, component_dp),
            bar(breakdown.bar_fraction(category))
        ));
    }

    lines.extend([
        format!("  {:<10} {:>12}/sqft", "Total Cost", money.fixed(breakdown.total_cost_per_sq_ft, component_dp)),
        format!(
            "  {:<10} {:>12}/sqft",
            format!("+ {} Margin", margin),
            money.fixed(breakdown.margin_per_sq_ft, component_dp)
        ),
        String::new(),
        "Monthly Volume:".to_string(),
        format!("  Total Sq Ft: {} sqft", format_area(breakdown.monthly_sq_ft)),
        format!("  Revenue:     {}", money.whole(breakdown.monthly_revenue)),
        format!("  All Costs:   {}", money.whole(breakdown.monthly_cost())),
        format!("  Net Profit:  {}", money.whole(breakdown.monthly_profit)),
        String::new(),
        "Section Totals:".to_string(),
    ]);

    for section in Section::ALL {
        let total = match section {
            Section::Volume => format!("{} sqft/mo", format_area(breakdown.monthly_sq_ft)),
            Section::Materials => format!("{}/mo", money.whole(breakdown.monthly_material_cost())),
            Section::Labor => format!("{}/mo", money.whole(breakdown.monthly_labor_cost())),
            Section::Equipment => format!("{}/mo", money.whole(inputs.equipment.monthly_total())),
            Section::Overhead => format!("{}/mo", money.whole(inputs.overhead.monthly_total())),
            Section::Loans => format!("{}/mo", money.whole(inputs.loans.monthly_total())),
            Section::OwnerSalary => format!("{}/mo", money.whole(inputs.owner_salary.monthly_total())),
        };
        lines.push(format!("  {:<28} {}", section.title(), total));
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}

/// Render the field catalogue grouped by section.
pub fn render_fields(settings: &PricingSettings) -> String {
    let mut lines = Vec::new();
    for section in Section::ALL {
        lines.push(format!("{}: {}", section.title(), section.description()));
        for spec in section.fields() {
            lines.push(format!(
                "  {:<45} {} [{} .. {}] default {}",
                spec.key,
                spec.label,
                value_with_unit(spec, spec.min, settings),
                value_with_unit(spec, spec.max, settings),
                value_with_unit(spec, spec.default_value(), settings)
            ));
            lines.push(format!("      {}", spec.help));
        }
        lines.push(String::new());
    }
    lines.push(format!("{} fields", fields().len()));
    lines.join("\n")
}

/// A value with the field's currency prefix and unit suffix
pub fn value_with_unit(spec: &FieldSpec, value: f64, settings: &PricingSettings) -> String {
    let number = format!("{:.*}", spec.decimals, value);
    let suffix = spec.unit.suffix();
    if spec.unit.is_currency() {
        format!("{}{}{}", settings.currency_symbol, number, suffix)
    } else if suffix.starts_with('%') {
        format!("{}{}", number, suffix)
    } else {
        format!("{} {}", number, suffix)
    }
}

fn bar(fraction: f64) -> String {
    let filled = if fraction.is_finite() {
        (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
