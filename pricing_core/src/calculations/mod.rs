//! # Pricing Calculations
//!
//! Each calculation follows the pattern:
//!
//! - an input record (JSON-serializable, see [`crate::inputs`])
//! - a result record (JSON-serializable)
//! - a pure compute function plus a checked `calculate` that validates
//!   first and returns `PricingResult`
//!
//! ## Available Calculations
//!
//! - [`pricing`] - Cost-per-square-foot breakdown and margin-protecting price

pub mod pricing;

pub use pricing::{calculate, compute_breakdown, CostBreakdown, CostCategory};
