//! # pricing_core - Sealcoating Price Calculation Engine
//!
//! `pricing_core` turns a sealcoating business's cost structure (materials,
//! labor, equipment, overhead, loans, owner pay, job volume) into a cost per
//! square foot and the price that protects a target net margin.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the engine is a pure function from inputs to a breakdown
//! - **JSON-First**: all records implement Serialize/Deserialize
//! - **Validate at the boundary**: the engine does plain arithmetic; range
//!   checks and clamping live in [`inputs`], [`margin`] and [`settings`]
//!
//! ## Quick Start
//!
//! ```rust
//! use pricing_core::{calculate, CalculatorInputs};
//! use pricing_core::format::format_currency;
//!
//! let mut inputs = CalculatorInputs::default();
//! inputs.set("volume.monthly_job_count", 25.0).unwrap();
//!
//! let breakdown = calculate(&inputs, 0.40).unwrap();
//! println!("Charge {}/sqft", format_currency(breakdown.recommended_price_per_sq_ft, 2));
//! ```
//!
//! ## Modules
//!
//! - [`inputs`] - Cost-input records, defaults, and the field catalogue
//! - [`calculations`] - The pricing engine and its result record
//! - [`margin`] - Validated target margin
//! - [`format`] - Currency and area formatting
//! - [`settings`] - Front-end settings loaded from TOML
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod format;
pub mod inputs;
pub mod margin;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, compute_breakdown, CostBreakdown, CostCategory};
pub use errors::{PricingError, PricingResult};
pub use inputs::CalculatorInputs;
pub use margin::TargetMargin;
pub use settings::PricingSettings;
