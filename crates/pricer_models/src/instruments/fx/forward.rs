//! FX forward instrument definitions.
//!
//! The forward buys `notional` units of the foreign currency at `strike`
//! on the last grid date. Its value at an FX level `x` is
//! `notional × (x − strike)`, and the counterparty exposure is the positive
//! part of that value.

use pricer_core::types::PricingError;

/// Long FX forward with a fixed strike and notional.
///
/// # Conventions
///
/// - Notional is in foreign (base) currency
/// - Strike and FX levels are units of domestic currency per unit of foreign
/// - Value and exposure are in domestic currency, undiscounted
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::fx::FxForward;
///
/// // Buy 1M USD at 10 ZAR
/// let forward = FxForward::new(10.0, 1_000_000.0).unwrap();
///
/// // At 10.25 the forward is worth 250,000 ZAR to us
/// assert!((forward.value(10.25) - 250_000.0).abs() < 1e-6);
///
/// // Out of the money: no exposure to the counterparty
/// assert_eq!(forward.exposure(9.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxForward {
    strike: f64,
    notional: f64,
}

impl FxForward {
    /// Creates a new FX forward.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] if `strike` or `notional`
    /// is not finite and strictly positive.
    pub fn new(strike: f64, notional: f64) -> Result<Self, PricingError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(PricingError::invalid_parameter(
                "strike",
                format!("must be finite and positive, got {}", strike),
            ));
        }
        if !(notional.is_finite() && notional > 0.0) {
            return Err(PricingError::invalid_parameter(
                "notional",
                format!("must be finite and positive, got {}", notional),
            ));
        }
        Ok(Self { strike, notional })
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the notional.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Mark-to-market at FX level `fx`.
    #[inline]
    pub fn value(&self, fx: f64) -> f64 {
        self.notional * (fx - self.strike)
    }

    /// Positive exposure `max(value, 0)` at FX level `fx`.
    #[inline]
    pub fn exposure(&self, fx: f64) -> f64 {
        self.value(fx).max(0.0)
    }
}
