//! # Settings
//!
//! Presentation and boundary settings shared by front-ends: the currency
//! symbol, display precision, and the margin slider range. Settings are
//! read from TOML; every key is optional.
//!
//! ```rust
//! use pricing_core::settings::PricingSettings;
//!
//! let settings = PricingSettings::from_toml_str(r#"
//!     currency_symbol = "C$"
//!     default_margin = 0.35
//! "#).unwrap();
//! assert_eq!(settings.currency_symbol, "C$");
//! assert_eq!(settings.margin_max, 0.60);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PricingError, PricingResult};
use crate::format::{CurrencyFormat, DEFAULT_SYMBOL};
use crate::margin::{TargetMargin, SLIDER_MAX, SLIDER_MIN};

/// Front-end settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Prefix for money values (e.g., "$")
    pub currency_symbol: String,

    /// Margin used when none is given
    pub default_margin: f64,

    /// Lowest margin a user may pick
    pub margin_min: f64,

    /// Highest margin a user may pick
    pub margin_max: f64,

    /// Decimals for the headline price and totals
    pub price_decimals: usize,

    /// Decimals for the per-component cost lines
    pub component_decimals: usize,
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            currency_symbol: DEFAULT_SYMBOL.to_string(),
            default_margin: TargetMargin::DEFAULT.fraction(),
            margin_min: SLIDER_MIN,
            margin_max: SLIDER_MAX,
            price_decimals: 2,
            component_decimals: 4,
        }
    }
}

impl PricingSettings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(text: &str) -> PricingResult<Self> {
        let settings: PricingSettings = toml::from_str(text).map_err(|e| PricingError::SerializationError {
            reason: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    pub fn load(path: &Path) -> PricingResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PricingError::config_error(path.display().to_string(), e.to_string()))?;
        let settings = Self::from_toml_str(&text).map_err(|e| match e {
            PricingError::SerializationError { reason } => {
                PricingError::config_error(path.display().to_string(), reason)
            }
            other => other,
        })?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Check the margin range is usable.
    ///
    /// Requires `0 < margin_min <= default_margin <= margin_max < 1`.
    pub fn validate(&self) -> PricingResult<()> {
        TargetMargin::new(self.margin_min)?;
        TargetMargin::new(self.margin_max)?;
        if self.margin_min > self.margin_max {
            return Err(PricingError::invalid_input(
                "margin_min",
                self.margin_min.to_string(),
                format!("Must not exceed margin_max ({})", self.margin_max),
            ));
        }
        if !(self.margin_min..=self.margin_max).contains(&self.default_margin) {
            return Err(PricingError::invalid_input(
                "default_margin",
                self.default_margin.to_string(),
                format!("Must lie within [{}, {}]", self.margin_min, self.margin_max),
            ));
        }
        Ok(())
    }

    /// Clamp a requested margin into this range; `None` gives the default.
    pub fn margin(&self, requested: Option<f64>) -> TargetMargin {
        let fraction = requested.unwrap_or(self.default_margin);
        TargetMargin::clamp_between(fraction, self.margin_min, self.margin_max)
    }

    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_symbol.clone())
    }
}
