//! # Target Margin
//!
//! Net margin expressed as a fraction of the selling price (margin-on-price,
//! not markup). A [`TargetMargin`] is always finite and strictly inside
//! (0, 1), so `cost / (1 - margin)` is defined and positive.
//!
//! ```rust
//! use pricing_core::margin::TargetMargin;
//!
//! let margin = TargetMargin::new(0.40).unwrap();
//! assert_eq!(margin.percent(), 40.0);
//!
//! assert!(TargetMargin::new(1.0).is_err());
//! assert_eq!(TargetMargin::clamp_to_slider(0.95).fraction(), 0.60);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{PricingError, PricingResult};

/// Lowest margin offered by the margin slider (aggressive bids)
pub const SLIDER_MIN: f64 = 0.10;
/// Highest margin offered by the margin slider (premium pricing)
pub const SLIDER_MAX: f64 = 0.60;

/// Validated margin fraction in (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TargetMargin(f64);

impl TargetMargin {
    /// 40% net margin
    pub const DEFAULT: TargetMargin = TargetMargin(0.40);

    /// Accept a fraction strictly between 0 and 1.
    pub fn new(fraction: f64) -> PricingResult<Self> {
        if !fraction.is_finite() {
            return Err(PricingError::invalid_margin(fraction, "Margin must be a finite number"));
        }
        if fraction <= 0.0 {
            return Err(PricingError::invalid_margin(fraction, "Margin must be greater than 0"));
        }
        if fraction >= 1.0 {
            return Err(PricingError::invalid_margin(
                fraction,
                "Margin must be less than 1 (price = cost / (1 - margin))",
            ));
        }
        Ok(TargetMargin(fraction))
    }

    /// Accept a percentage, e.g. `40.0` for 40%.
    pub fn from_percent(percent: f64) -> PricingResult<Self> {
        Self::new(percent / 100.0)
    }

    /// Clamp into the slider range and snap to whole percent.
    ///
    /// Non-finite input falls back to [`DEFAULT`](Self::DEFAULT).
    pub fn clamp_to_slider(fraction: f64) -> Self {
        Self::clamp_between(fraction, SLIDER_MIN, SLIDER_MAX)
    }

    /// Clamp into `[min, max]` and snap to whole percent.
    ///
    /// `min` and `max` must themselves lie in (0, 1); see
    /// [`PricingSettings::validate`](crate::settings::PricingSettings::validate).
    pub fn clamp_between(fraction: f64, min: f64, max: f64) -> Self {
        if !fraction.is_finite() {
            return Self::DEFAULT.clamp_self(min, max);
        }
        let snapped = (fraction.clamp(min, max) * 100.0).round() / 100.0;
        TargetMargin(snapped.clamp(min, max))
    }

    fn clamp_self(self, min: f64, max: f64) -> Self {
        TargetMargin(self.0.clamp(min, max))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for TargetMargin {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for TargetMargin {
    type Error = PricingError;

    fn try_from(value: f64) -> PricingResult<Self> {
        TargetMargin::new(value)
    }
}

impl From<TargetMargin> for f64 {
    fn from(margin: TargetMargin) -> f64 {
        margin.0
    }
}
