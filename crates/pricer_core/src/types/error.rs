//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from invalid model or instrument inputs
//! - `GridError`: Errors from simulation grid construction

use thiserror::Error;

/// Categorised pricing errors.
///
/// Raised before any simulation runs when model, instrument or funding
/// inputs are unusable.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidParameter {
///     name: "rho",
///     reason: "must be in [-1, 1], got 1.5".to_string(),
/// };
/// assert_eq!(format!("{}", err), "Invalid parameter 'rho': must be in [-1, 1], got 1.5");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A named parameter is outside its valid domain
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the violation
        reason: String,
    },
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Simulation grid errors.
///
/// # Examples
/// ```
/// use pricer_core::types::GridError;
///
/// let err = GridError::TooFewPoints { got: 1 };
/// assert_eq!(format!("{}", err), "Time grid needs at least 2 points, got 1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    /// Fewer than two grid points.
    #[error("Time grid needs at least 2 points, got {got}")]
    TooFewPoints {
        /// Number of points supplied
        got: usize,
    },

    /// A grid point is NaN or infinite.
    #[error("Time grid point {index} is not finite")]
    NonFinite {
        /// Offending index
        index: usize,
    },

    /// Step between `index - 1` and `index` is zero or negative.
    #[error("Non-positive time step {dt} ending at index {index}")]
    NonPositiveStep {
        /// Index of the step end point
        index: usize,
        /// Observed step
        dt: f64,
    },

    /// Step differs from the first step.
    #[error("Non-uniform time step {dt} ending at index {index}, expected {expected}")]
    NonUniformStep {
        /// Index of the step end point
        index: usize,
        /// Observed step
        dt: f64,
        /// Step derived from the first two points
        expected: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_helper() {
        let err = PricingError::invalid_parameter("vol_fx", "must be non-negative");
        assert_eq!(
            err,
            PricingError::InvalidParameter {
                name: "vol_fx",
                reason: "must be non-negative".to_string()
            }
        );
        assert!(err.to_string().contains("vol_fx"));
    }

    #[test]
    fn test_grid_error_display() {
        let err = GridError::NonPositiveStep { index: 3, dt: -0.5 };
        assert!(err.to_string().contains("index 3"));

        let err = GridError::NonUniformStep {
            index: 2,
            dt: 0.3,
            expected: 0.25,
        };
        assert!(err.to_string().contains("expected 0.25"));
    }
}
