//! XVA parameter structures.

use super::error::XvaError;

/// Funding spread for FVA.
///
/// A single annualised spread applied to positive exposure while the
/// counterparty is alive. The accrual per grid step is `spread × dt`.
///
/// # Examples
///
/// ```
/// use pricer_xva::xva::FundingParams;
///
/// let params = FundingParams::new(0.02).unwrap();
/// assert_eq!(params.spread(), 0.02);
///
/// assert!(FundingParams::new(-0.01).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FundingParams {
    /// Annualised decimal spread (e.g. 0.02 = 200bp).
    spread: f64,
}

impl FundingParams {
    /// Creates funding parameters.
    ///
    /// # Errors
    ///
    /// Returns `XvaError::InvalidFundingSpread` for a negative or
    /// non-finite spread.
    pub fn new(spread: f64) -> Result<Self, XvaError> {
        let params = Self { spread };
        params.validate()?;
        Ok(params)
    }

    /// Zero spread (no FVA).
    #[inline]
    pub fn zero() -> Self {
        Self { spread: 0.0 }
    }

    /// Annualised spread.
    #[inline]
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Funding accrual over a step of length `dt`.
    #[inline]
    pub fn accrual(&self, dt: f64) -> f64 {
        self.spread * dt
    }

    /// Validates the funding parameters.
    pub fn validate(&self) -> Result<(), XvaError> {
        if !self.spread.is_finite() {
            return Err(XvaError::InvalidFundingSpread(format!(
                "spread must be finite, got {}",
                self.spread
            )));
        }
        if self.spread < 0.0 {
            return Err(XvaError::InvalidFundingSpread(format!(
                "spread must be non-negative, got {}",
                self.spread
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_is_default() {
        assert_eq!(FundingParams::default(), FundingParams::zero());
        assert_eq!(FundingParams::zero().accrual(0.5), 0.0);
    }

    #[test]
    fn test_accrual() {
        let params = FundingParams::new(0.02).unwrap();
        assert_relative_eq!(params.accrual(1.0 / 12.0), 0.02 / 12.0);
    }

    #[test]
    fn test_rejects_invalid_spread() {
        assert!(matches!(
            FundingParams::new(-1e-4),
            Err(XvaError::InvalidFundingSpread(_))
        ));
        assert!(FundingParams::new(f64::NAN).is_err());
        assert!(FundingParams::new(f64::INFINITY).is_err());
    }
}
