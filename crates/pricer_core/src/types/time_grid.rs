//! Uniform simulation time grid.
//!
//! The default-simulation engine discretises on a grid `t_0 < t_1 < ... < t_{n-1}`
//! where `t_0` is the valuation date and `t_{n-1}` the maturity of the trade.
//! The step `dt` is derived once from the first two points and every later
//! step must match it.

use super::error::GridError;

/// Relative tolerance used when checking that all steps equal the first one.
pub const UNIFORM_STEP_TOLERANCE: f64 = 1e-9;

/// Validated, strictly increasing, uniformly spaced time grid (in years).
///
/// # Examples
///
/// ```
/// use pricer_core::types::TimeGrid;
///
/// let grid = TimeGrid::linspace(0.0, 1.0, 13).unwrap();
/// assert_eq!(grid.len(), 13);
/// assert_eq!(grid.n_steps(), 12);
/// assert!((grid.dt() - 1.0 / 12.0).abs() < 1e-15);
/// assert_eq!(grid.maturity(), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeGrid {
    times: Vec<f64>,
    dt: f64,
}

impl TimeGrid {
    /// Builds a grid from explicit time points.
    ///
    /// # Errors
    ///
    /// - [`GridError::TooFewPoints`] for fewer than two points
    /// - [`GridError::NonFinite`] for NaN or infinite points
    /// - [`GridError::NonPositiveStep`] if the grid is not strictly increasing
    /// - [`GridError::NonUniformStep`] if a step differs from the first one
    pub fn new(times: Vec<f64>) -> Result<Self, GridError> {
        if times.len() < 2 {
            return Err(GridError::TooFewPoints { got: times.len() });
        }
        if let Some(index) = times.iter().position(|t| !t.is_finite()) {
            return Err(GridError::NonFinite { index });
        }

        let dt = times[1] - times[0];
        if dt <= 0.0 {
            return Err(GridError::NonPositiveStep { index: 1, dt });
        }

        for index in 2..times.len() {
            let step = times[index] - times[index - 1];
            if step <= 0.0 {
                return Err(GridError::NonPositiveStep { index, dt: step });
            }
            if (step - dt).abs() > UNIFORM_STEP_TOLERANCE * dt {
                return Err(GridError::NonUniformStep {
                    index,
                    dt: step,
                    expected: dt,
                });
            }
        }

        Ok(Self { times, dt })
    }

    /// Builds `n_points` equally spaced points on `[start, end]`.
    ///
    /// The last point is set to `end` exactly.
    pub fn linspace(start: f64, end: f64, n_points: usize) -> Result<Self, GridError> {
        if n_points < 2 {
            return Err(GridError::TooFewPoints { got: n_points });
        }
        let step = (end - start) / (n_points - 1) as f64;
        let mut times: Vec<f64> = (0..n_points).map(|i| start + step * i as f64).collect();
        times[n_points - 1] = end;
        Self::new(times)
    }

    /// Grid points.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of grid points `n`.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; a valid grid has at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of steps `n - 1`.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Uniform step size.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Maturity `t_{n-1}`.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}
