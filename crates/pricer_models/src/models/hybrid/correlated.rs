//! Correlated two-factor Brownian drivers.
//!
//! Given independent standard normals `Z1`, `Z2`, the pair
//!
//! ```text
//! W1 = Z1
//! W2 = ρ·Z1 + √(1 − ρ²)·Z2
//! ```
//!
//! has unit variances and correlation `ρ`. This is the lower Cholesky factor
//! of the 2×2 correlation matrix written out, which stays well-defined at
//! `ρ = ±1` where the matrix is only semi-definite.
//!
//! ## Usage
//!
//! ```
//! use pricer_models::models::hybrid::CorrelatedPair;
//!
//! let pair = CorrelatedPair::new(0.5_f64).unwrap();
//! let (w1, w2) = pair.correlate(1.0, 0.0);
//! assert_eq!(w1, 1.0);
//! assert!((w2 - 0.5).abs() < 1e-15);
//! ```

use num_traits::Float;
use thiserror::Error;

/// Error types for correlation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// Correlation value out of range [-1, 1]
    #[error("Correlation {value} must be in [-1, 1]")]
    OutOfRange {
        /// Offending value
        value: f64,
    },
    /// Correlation is NaN
    #[error("Correlation is not a number")]
    NotANumber,
}

/// Two correlated Brownian drivers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrelatedPair<T: Float> {
    rho: T,
    /// √(1 − ρ²), cached for the hot loop
    complement: T,
}

impl<T: Float> CorrelatedPair<T> {
    /// Creates a correlated pair.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationError::OutOfRange`] for `|ρ| > 1` and
    /// [`CorrelationError::NotANumber`] for NaN.
    pub fn new(rho: T) -> Result<Self, CorrelationError> {
        if rho.is_nan() {
            return Err(CorrelationError::NotANumber);
        }
        if rho < -T::one() || rho > T::one() {
            return Err(CorrelationError::OutOfRange {
                value: rho.to_f64().unwrap_or(f64::NAN),
            });
        }

        let complement = (T::one() - rho * rho).max(T::zero()).sqrt();
        Ok(Self { rho, complement })
    }

    /// Independent drivers (ρ = 0).
    pub fn independent() -> Self {
        Self {
            rho: T::zero(),
            complement: T::one(),
        }
    }

    /// Returns the correlation.
    #[inline]
    pub fn rho(&self) -> T {
        self.rho
    }

    /// Maps independent normals `(z1, z2)` to correlated `(w1, w2)`.
    #[inline]
    pub fn correlate(&self, z1: T, z2: T) -> (T, T) {
        (z1, self.rho * z1 + self.complement * z2)
    }
}

impl<T: Float> Default for CorrelatedPair<T> {
    fn default() -> Self {
        Self::independent()
    }
}
