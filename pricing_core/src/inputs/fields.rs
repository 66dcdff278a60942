//! # Field Catalogue
//!
//! One [`FieldSpec`] per leaf input, in form order. Each entry carries the
//! display metadata a front-end needs (label, unit, help text) plus the
//! accepted range used to clamp values at the input boundary.
//!
//! ```rust
//! use pricing_core::inputs::{field, fields, Section};
//!
//! let crew = field("labor.crew_size").unwrap();
//! assert_eq!(crew.section, Section::Labor);
//! assert_eq!(crew.clamp(35.0), 20.0);
//! assert_eq!(fields().len(), 31);
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::CalculatorInputs;
use crate::errors::{PricingError, PricingResult};

/// Upper bound for money fields that have no tighter range
pub const DEFAULT_MAX: f64 = 999_999.0;

/// Form section a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    Volume,
    Materials,
    Labor,
    Equipment,
    Overhead,
    Loans,
    OwnerSalary,
}

impl Section {
    /// All sections in form order
    pub const ALL: [Section; 7] = [
        Section::Volume,
        Section::Materials,
        Section::Labor,
        Section::Equipment,
        Section::Overhead,
        Section::Loans,
        Section::OwnerSalary,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Volume => "Job Volume",
            Section::Materials => "Materials",
            Section::Labor => "Labor",
            Section::Equipment => "Equipment & Truck Payments",
            Section::Overhead => "Overhead",
            Section::Loans => "Business Loans & Financing",
            Section::OwnerSalary => "Owner's Salary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Section::Volume => "How much work do you expect each month?",
            Section::Materials => "Sealer, additives, crack filler, and line paint",
            Section::Labor => "Crew wages, payroll taxes, and workers comp",
            Section::Equipment => "Monthly payments for trucks, rigs, and gear",
            Section::Overhead => "Insurance, fuel, marketing, and operating expenses",
            Section::Loans => "Monthly debt service payments",
            Section::OwnerSalary => "What you want to pay yourself each month",
        }
    }

    /// Fields of this section, in form order
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        let section = *self;
        FIELDS.iter().filter(move |f| f.section == section)
    }
}

/// How a field's value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "suffix")]
pub enum Unit {
    /// Money, shown with the currency symbol and an optional suffix ("/mo")
    Currency(&'static str),
    /// Plain quantity with a suffix ("jobs", "sqft", "%")
    Quantity(&'static str),
}

impl Unit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Currency(s) | Unit::Quantity(s) => s,
        }
    }

    pub fn is_currency(&self) -> bool {
        matches!(self, Unit::Currency(_))
    }
}

/// Metadata and accessors for one leaf input field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    /// Dotted key, `section.field`
    pub key: &'static str,
    pub section: Section,
    pub label: &'static str,
    pub unit: Unit,
    pub min: f64,
    pub max: f64,
    /// Increment used by stepper controls
    pub step: f64,
    /// Decimal places shown when editing
    pub decimals: usize,
    pub help: &'static str,
    #[serde(skip)]
    pub get: fn(&CalculatorInputs) -> f64,
    #[serde(skip)]
    pub set: fn(&mut CalculatorInputs, f64),
}

impl FieldSpec {
    /// Clamp into `[min, max]`. Non-finite values become `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.min
        }
    }

    /// Value of this field in the industry-default inputs
    pub fn default_value(&self) -> f64 {
        (self.get)(&CalculatorInputs::default())
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

macro_rules! field_spec {
    (
        $section:ident, $record:ident . $name:ident, $label:expr, $unit:expr,
        [$min:expr, $max:expr], step $step:expr, decimals $decimals:expr, $help:expr
    ) => {
        FieldSpec {
            key: concat!(stringify!($record), ".", stringify!($name)),
            section: Section::$section,
            label: $label,
            unit: $unit,
            min: $min,
            max: $max,
            step: $step,
            decimals: $decimals,
            help: $help,
            get: |inputs| inputs.$record.$name,
            set: |inputs, value| inputs.$record.$name = value,
        }
    };
}

static FIELDS: &[FieldSpec] = &[
    // Volume
    field_spec!(
        Volume, volume.monthly_job_count, "Jobs Per Month", Unit::Quantity("jobs"),
        [1.0, 200.0], step 1.0, decimals 0,
        "How many sealcoating jobs do you expect to complete each month? Start conservative: 15-25 is typical for a new crew."
    ),
    FieldSpec {
        key: "volume.avg_job_sq_ft",
        section: Section::Volume,
        label: "Average Job Size",
        unit: Unit::Quantity("sqft"),
        min: 100.0,
        max: 500_000.0,
        step: 500.0,
        decimals: 0,
        help: "Average square footage per job. Residential driveways: 800-2,000 sqft. Small commercial lots: 3,000-10,000 sqft. Large commercial: 10,000+ sqft.",
        get: |inputs| inputs.volume.avg_job_sq_ft,
        // the form edits one job size and writes it to both records
        set: |inputs, value| inputs.set_avg_job_sq_ft(value),
    },
    // Materials
    field_spec!(
        Materials, materials.sealer_cost_per_gallon, "Sealer Cost Per Gallon", Unit::Currency(""),
        [0.0, DEFAULT_MAX], step 0.5, decimals 2,
        "Cost per gallon of sealcoat material. Coal tar: $12-18/gal. Asphalt emulsion: $10-15/gal. Buying in bulk (275-gal totes or drums) is cheaper."
    ),
    field_spec!(
        Materials, materials.coverage_rate_per_gallon, "Coverage Rate", Unit::Quantity("sqft/gal"),
        [10.0, 200.0], step 5.0, decimals 0,
        "Square feet covered per gallon of sealer. Typical: 60-100 sqft/gal depending on surface condition and application method. Rough surfaces use more material."
    ),
    field_spec!(
        Materials, materials.additives_cost_per_gallon, "Additives Cost Per Gallon", Unit::Currency(""),
        [0.0, DEFAULT_MAX], step 0.25, decimals 2,
        "Cost of additives (sand, latex, polymer) per gallon of sealer mixed. Sand adds traction and durability. Typical: $2-5/gallon of sealer."
    ),
    field_spec!(
        Materials, materials.crack_filler_cost_per_linear_ft, "Crack Filler Cost", Unit::Currency("/lin ft"),
        [0.0, DEFAULT_MAX], step 0.05, decimals 2,
        "Cost of hot or cold pour crack filler per linear foot. Hot pour: $0.30-0.75/ft. Cold pour: $0.15-0.40/ft."
    ),
    field_spec!(
        Materials, materials.avg_crack_ft_per_job, "Avg Crack Feet Per Job", Unit::Quantity("lin ft"),
        [0.0, 5000.0], step 25.0, decimals 0,
        "Average linear feet of cracks to fill per job. Varies widely: 50-500+ ft depending on lot condition. Set to 0 if you don't offer crack filling."
    ),
    field_spec!(
        Materials, materials.line_paint_cost_per_job, "Line Paint Per Job", Unit::Currency(""),
        [0.0, DEFAULT_MAX], step 5.0, decimals 2,
        "Average cost of line striping materials per job. Includes paint and stencils. Set to 0 if you sub this out or don't offer striping."
    ),
    // Labor
    field_spec!(
        Labor, labor.crew_size, "Crew Size", Unit::Quantity("workers"),
        [1.0, 20.0], step 1.0, decimals 0,
        "Number of workers on a typical job (including yourself if you work on the crew). Most crews run 2-4 people."
    ),
    field_spec!(
        Labor, labor.hourly_wage_per_worker, "Hourly Wage Per Worker", Unit::Currency("/hr"),
        [0.0, DEFAULT_MAX], step 0.5, decimals 2,
        "Average hourly pay per crew member. Entry level: $14-16/hr. Experienced: $18-25/hr. Foreman: $22-30/hr."
    ),
    field_spec!(
        Labor, labor.avg_job_time_hours, "Average Job Time", Unit::Quantity("hours"),
        [0.5, 24.0], step 0.5, decimals 2,
        "Average hours to complete one job (including setup and cleanup). Residential: 2-3 hrs. Small commercial: 3-6 hrs. Large commercial: 6-10+ hrs."
    ),
    field_spec!(
        Labor, labor.payroll_tax_rate, "Payroll Tax Rate", Unit::Quantity("%"),
        [0.0, 30.0], step 0.5, decimals 2,
        "Employer's share of payroll taxes (Social Security, Medicare, FUTA, SUTA). Typically 12-18% of gross wages."
    ),
    field_spec!(
        Labor, labor.workers_comp_rate, "Workers Comp Rate", Unit::Quantity("%"),
        [0.0, 25.0], step 0.5, decimals 2,
        "Workers compensation insurance rate as % of payroll. Sealcoating is considered high-risk: typically 5-12% depending on state and claims history."
    ),
    field_spec!(
        Labor, labor.avg_job_sq_ft, "Labor Job Size", Unit::Quantity("sqft"),
        [100.0, 500_000.0], step 500.0, decimals 0,
        "Job area used to spread crew cost per square foot. Normally the same as Average Job Size; setting Average Job Size updates this too."
    ),
    // Equipment
    field_spec!(
        Equipment, equipment.truck_payment, "Truck Payment", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly truck payment. Used work trucks: $300-600/mo. New trucks: $600-1,200/mo. Set to 0 if paid off."
    ),
    field_spec!(
        Equipment, equipment.spray_rig_payment, "Spray Rig / Squeegee Machine", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly payment for your spray system or squeegee machine. New spray rigs: $300-800/mo financed. Set to 0 if paid off or using squeegees."
    ),
    field_spec!(
        Equipment, equipment.other_equipment_payment, "Other Equipment", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly payments for blowers, edgers, crack fill machines, line stripers, and other tools. Estimate total monthly cost."
    ),
    field_spec!(
        Equipment, equipment.maintenance_budget, "Maintenance Budget", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly budget for equipment repairs, replacement parts, oil changes, etc. Rule of thumb: 5-10% of equipment value per year, divided by 12."
    ),
    // Overhead
    field_spec!(
        Overhead, overhead.general_liability_insurance, "General Liability Insurance", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly general liability insurance premium. Most sealcoating businesses: $150-400/mo for $1M/$2M policy. Required by most commercial clients."
    ),
    field_spec!(
        Overhead, overhead.auto_insurance, "Auto Insurance", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly commercial auto insurance for your work vehicles. Typically $150-350/mo per vehicle depending on coverage and driving record."
    ),
    field_spec!(
        Overhead, overhead.workers_comp_insurance, "Workers Comp Insurance", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly workers compensation insurance premium (separate from the payroll % rate above). This is your fixed monthly premium payment."
    ),
    field_spec!(
        Overhead, overhead.fuel_costs, "Fuel Costs", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly fuel for trucks and equipment. Depends on service area size. Typical: $400-1,000/mo during season."
    ),
    field_spec!(
        Overhead, overhead.marketing_budget, "Marketing & Advertising", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly marketing spend: Google Ads, door hangers, yard signs, vehicle wraps (amortized), website, social media ads. Critical for new businesses."
    ),
    field_spec!(
        Overhead, overhead.phone_software_office, "Phone / Software / Office", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly costs for business phone, CRM software, estimating tools, accounting software, office supplies, etc."
    ),
    field_spec!(
        Overhead, overhead.uniforms_safety_gear, "Uniforms & Safety Gear", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 10.0, decimals 2,
        "Monthly budget for crew uniforms, boots, gloves, safety glasses, hard hats, and other PPE. Amortize annual costs monthly."
    ),
    field_spec!(
        Overhead, overhead.storage_yard_rental, "Storage / Yard Rental", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly rent for equipment storage, material yard, or shop space. Set to 0 if you operate from home."
    ),
    // Loans
    field_spec!(
        Loans, loans.sba_loan_payment, "SBA Loan Payment", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly SBA loan payment. Common for startup businesses. Set to 0 if you don't have one."
    ),
    field_spec!(
        Loans, loans.equipment_financing, "Equipment Financing", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly equipment financing payments not already counted in the Equipment section above. Avoid double-counting."
    ),
    field_spec!(
        Loans, loans.line_of_credit_payment, "Line of Credit Payments", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Monthly payments on business line of credit. Useful for managing cash flow during slow months."
    ),
    field_spec!(
        Loans, loans.other_debt_service, "Other Debt Service", Unit::Currency("/mo"),
        [0.0, DEFAULT_MAX], step 25.0, decimals 2,
        "Any other monthly business debt payments: credit cards, personal loans used for business, etc."
    ),
    // Owner
    field_spec!(
        OwnerSalary, owner_salary.monthly_salary, "Monthly Owner's Salary", Unit::Currency("/mo"),
        [0.0, 100_000.0], step 250.0, decimals 2,
        "What you want to take home each month as the business owner. This is a real cost that must be covered. $4,000-10,000/mo is typical depending on your area and experience."
    ),
];

static INDEX: Lazy<HashMap<&'static str, &'static FieldSpec>> =
    Lazy::new(|| FIELDS.iter().map(|spec| (spec.key, spec)).collect());

/// Every field, in form order.
pub fn fields() -> &'static [FieldSpec] {
    FIELDS
}

/// Look up a field by its dotted key.
pub fn field(key: &str) -> PricingResult<&'static FieldSpec> {
    INDEX
        .get(key)
        .copied()
        .ok_or_else(|| PricingError::unknown_field(key))
}
