//! # Error Types
//!
//! Structured error types for pricing_core. The pure engine never fails;
//! these errors come from the checked entry points at the input boundary
//! (margin validation, field lookup, input validation, settings loading).
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::errors::{PricingError, PricingResult};
//!
//! fn validate_job_count(count: f64) -> PricingResult<()> {
//!     if count < 0.0 {
//!         return Err(PricingError::invalid_input(
//!             "volume.monthly_job_count",
//!             count.to_string(),
//!             "Job count cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_job_count(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pricing_core operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Structured error type for pricing operations.
///
/// Serializes as `{"type": "...", "details": {...}}` so front-ends can
/// report problems field by field.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PricingError {
    /// An input value is invalid (negative, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Target margin outside the open interval (0, 1)
    #[error("Invalid target margin {value}: {reason}")]
    InvalidMargin { value: String, reason: String },

    /// Field key not present in the field catalogue
    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    /// Settings file could not be read or parsed
    #[error("Config error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl PricingError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidMargin error
    pub fn invalid_margin(value: f64, reason: impl Into<String>) -> Self {
        PricingError::InvalidMargin {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownField error
    pub fn unknown_field(field: impl Into<String>) -> Self {
        PricingError::UnknownField { field: field.into() }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { .. } => "INVALID_INPUT",
            PricingError::InvalidMargin { .. } => "INVALID_MARGIN",
            PricingError::UnknownField { .. } => "UNKNOWN_FIELD",
            PricingError::ConfigError { .. } => "CONFIG_ERROR",
            PricingError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::SerializationError {
            reason: err.to_string(),
        }
    }
}
