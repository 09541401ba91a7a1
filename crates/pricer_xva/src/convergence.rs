//! Convergence sweep over simulation counts.
//!
//! Runs the full generate-then-estimate pipeline at a sequence of path
//! counts so the three estimators can be compared as N grows. The default
//! schedule uses half powers of two, `N = ⌊2^(i/2)⌋`, which doubles the
//! count every two points.
//!
//! Points are simulated one after another on independent RNG streams: the
//! point at position `k` uses `seed + k`.

use pricer_core::types::TimeGrid;
use pricer_models::instruments::FxForward;
use pricer_models::models::CreditFxParams;
use pricer_pricing::mc::{generate_paths, McEstimate, SimulationConfig, MAX_PATHS};

use crate::xva::{Estimator, EstimatorTriple, ForwardXvaCalculator, FundingParams, XvaError};

/// Ordered list of path counts to simulate.
///
/// # Examples
///
/// ```
/// use pricer_xva::convergence::ConvergenceSweep;
///
/// let sweep = ConvergenceSweep::half_powers(20, 23).unwrap();
/// assert_eq!(sweep.path_counts(), &[1024, 1448, 2048, 2896]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvergenceSweep {
    path_counts: Vec<usize>,
}

impl ConvergenceSweep {
    /// Explicit schedule, simulated in the given order.
    ///
    /// # Errors
    ///
    /// Returns `XvaError::InvalidSchedule` if the list is empty or a count is
    /// outside `[1, MAX_PATHS]`.
    pub fn new(path_counts: Vec<usize>) -> Result<Self, XvaError> {
        if path_counts.is_empty() {
            return Err(XvaError::InvalidSchedule("no path counts".to_string()));
        }
        if let Some(&bad) = path_counts.iter().find(|&&n| n == 0 || n > MAX_PATHS) {
            return Err(XvaError::InvalidSchedule(format!(
                "path count {} outside [1, {}]",
                bad, MAX_PATHS
            )));
        }
        Ok(Self { path_counts })
    }

    /// `N = ⌊2^(i/2)⌋` for `i` in `first..=last`, ascending and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns `XvaError::InvalidSchedule` if `first > last` or the largest
    /// count exceeds `MAX_PATHS`.
    pub fn half_powers(first: u32, last: u32) -> Result<Self, XvaError> {
        if first > last {
            return Err(XvaError::InvalidSchedule(format!(
                "first exponent {} after last exponent {}",
                first, last
            )));
        }
        if last / 2 >= usize::BITS - 1 {
            return Err(XvaError::InvalidSchedule(format!(
                "last exponent {} too large",
                last
            )));
        }
        let mut counts: Vec<usize> = (first..=last).map(half_power).collect();
        counts.dedup();
        Self::new(counts)
    }

    /// Path counts in simulation order.
    #[inline]
    pub fn path_counts(&self) -> &[usize] {
        &self.path_counts
    }

    /// Runs the sweep.
    ///
    /// With `seed = None` every point draws its own seed from entropy.
    ///
    /// # Errors
    ///
    /// Returns `XvaError` if path generation or estimation fails.
    pub fn run(
        &self,
        grid: &TimeGrid,
        params: &CreditFxParams,
        forward: &FxForward,
        funding: &FundingParams,
        seed: Option<u64>,
    ) -> Result<ConvergenceSeries, XvaError> {
        let calculator = ForwardXvaCalculator::new(*forward, *funding);
        let mut points = Vec::with_capacity(self.path_counts.len());

        for (k, &n_paths) in self.path_counts.iter().enumerate() {
            let config = SimulationConfig::builder()
                .n_paths(n_paths)
                .maybe_seed(seed.map(|s| s.wrapping_add(k as u64)))
                .build()?;
            let paths = generate_paths(grid, &config, params)?;
            let xva = calculator.compute(&paths)?;

            tracing::info!(
                point = k,
                n_paths,
                seed = paths.seed(),
                cva = xva.cva.hazard_weighted.value,
                fva = xva.fva.hazard_weighted.value,
                "convergence point"
            );
            points.push(ConvergencePoint {
                n_paths,
                seed: paths.seed(),
                cva: xva.cva,
                fva: xva.fva,
            });
        }

        Ok(ConvergenceSeries { points })
    }
}

/// `⌊2^(i/2)⌋`, exact for even `i`.
fn half_power(i: u32) -> usize {
    let base = 1usize << (i / 2);
    if i % 2 == 0 {
        base
    } else {
        (base as f64 * std::f64::consts::SQRT_2).floor() as usize
    }
}

/// Estimates at one path count.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergencePoint {
    /// Simulation count.
    pub n_paths: usize,
    /// Seed the point was simulated with.
    pub seed: u64,
    /// CVA estimates.
    pub cva: EstimatorTriple,
    /// FVA estimates.
    pub fva: EstimatorTriple,
}

/// Result of a [`ConvergenceSweep`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceSeries {
    /// Points in simulation order.
    pub points: Vec<ConvergencePoint>,
}

impl ConvergenceSeries {
    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(n_paths, estimate)` of one CVA estimator across the sweep.
    pub fn cva_series(&self, estimator: Estimator) -> Vec<(usize, McEstimate)> {
        self.points
            .iter()
            .map(|p| (p.n_paths, p.cva.get(estimator)))
            .collect()
    }

    /// `(n_paths, estimate)` of one FVA estimator across the sweep.
    pub fn fva_series(&self, estimator: Estimator) -> Vec<(usize, McEstimate)> {
        self.points
            .iter()
            .map(|p| (p.n_paths, p.fva.get(estimator)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_powers_match_experiment_schedule() {
        let sweep = ConvergenceSweep::half_powers(20, 38).unwrap();
        let counts = sweep.path_counts();
        assert_eq!(counts.len(), 19);
        assert_eq!(counts[0], 1 << 10);
        assert_eq!(counts[1], 1448);
        assert_eq!(*counts.last().unwrap(), 1 << 19);
        assert!(counts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_half_powers_deduplicates_small_exponents() {
        // i = 0 and i = 1 both give N = 1
        let sweep = ConvergenceSweep::half_powers(0, 3).unwrap();
        assert_eq!(sweep.path_counts(), &[1, 2]);
    }

    #[test]
    fn test_invalid_schedules() {
        assert!(matches!(
            ConvergenceSweep::half_powers(5, 4),
            Err(XvaError::InvalidSchedule(_))
        ));
        assert!(ConvergenceSweep::new(vec![]).is_err());
        assert!(ConvergenceSweep::new(vec![10, 0]).is_err());
        assert!(ConvergenceSweep::new(vec![MAX_PATHS + 1]).is_err());
        assert!(ConvergenceSweep::half_powers(0, 60).is_err());
    }

    #[test]
    fn test_run_small_sweep() {
        let grid = TimeGrid::linspace(0.0, 1.0, 13).unwrap();
        let sweep = ConvergenceSweep::new(vec![64, 128]).unwrap();
        let series = sweep
            .run(
                &grid,
                &CreditFxParams::default(),
                &FxForward::new(10.0, 1e6).unwrap(),
                &FundingParams::new(0.02).unwrap(),
                Some(100),
            )
            .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].seed, 100);
        assert_eq!(series.points[1].seed, 101);

        let hazard = series.cva_series(Estimator::HazardWeighted);
        assert_eq!(hazard.iter().map(|(n, _)| *n).collect::<Vec<_>>(), vec![64, 128]);
        assert!(hazard.iter().all(|(_, e)| e.value > 0.0));
        assert_eq!(series.fva_series(Estimator::DirectDefault).len(), 2);
    }
}
