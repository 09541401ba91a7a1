//! XVA error types.

use pricer_pricing::mc::{ConfigError, SimulationError};
use thiserror::Error;

/// Errors from the CVA/FVA estimators and the convergence sweep.
///
/// # Examples
///
/// ```
/// use pricer_xva::xva::XvaError;
///
/// let err = XvaError::ShapeMismatch {
///     field: "fx_plain",
///     expected: (100, 13),
///     got: (100, 12),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Shape mismatch for fx_plain: expected (100, 13), got (100, 12)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XvaError {
    /// The batch holds no simulations.
    #[error("Empty simulation batch")]
    EmptyBatch,

    /// A batch array does not match `n_paths × n_points`.
    ///
    /// Per-simulation vectors are reported as `(len, 1)`.
    #[error("Shape mismatch for {field}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Offending field of the batch
        field: &'static str,
        /// Expected shape
        expected: (usize, usize),
        /// Actual shape
        got: (usize, usize),
    },

    /// A default index is 0 or beyond the last grid point.
    #[error("Default index {index} of simulation {path} outside [1, {n_points})")]
    DefaultIndexOutOfRange {
        /// Simulation row
        path: usize,
        /// Offending grid index
        index: usize,
        /// Grid length
        n_points: usize,
    },

    /// Funding spread is negative or not finite.
    #[error("Invalid funding spread: {0}")]
    InvalidFundingSpread(String),

    /// Convergence schedule is empty or has invalid path counts.
    #[error("Invalid convergence schedule: {0}")]
    InvalidSchedule(String),

    /// Path generation failed.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl From<ConfigError> for XvaError {
    fn from(err: ConfigError) -> Self {
        XvaError::Simulation(err.into())
    }
}
