//! Credit Valuation Adjustment (CVA) of an FX forward.
//!
//! CVA is the expected exposure at the counterparty's default. With
//! `E(x) = max(N·(x − K), 0)` the three estimators are, per simulation:
//!
//! ```text
//! hazard-weighted:    Σ_{j=1}^{n−1} (S_{j−1} − S_j) · E(x^dev_j)
//! direct default:     E(x^plain_τ)              if τ on the grid, else 0
//! importance default: w · E(x^imp_τ')           if τ' on the grid, else 0
//! ```
//!
//! The CVA is the mean of these contributions over the batch. No recovery or
//! discounting is applied.

use pricer_models::instruments::FxForward;
use pricer_pricing::mc::{DefaultTime, McEstimate, MeanAccumulator, SimulatedPaths};

use super::batch;
use super::error::XvaError;
use super::result::EstimatorTriple;

/// CVA by survival-curve weighting of the deviation-weighted FX path.
///
/// # Errors
///
/// Returns `XvaError` if the batch is empty or its arrays are misshapen.
pub fn cva_hazard_weighted(
    paths: &SimulatedPaths,
    forward: &FxForward,
) -> Result<McEstimate, XvaError> {
    let dims = batch::dims(paths)?;
    batch::matrix("survival", paths.survival(), dims)?;
    batch::matrix("fx_deviation", paths.fx_deviation(), dims)?;

    let mut acc = MeanAccumulator::default();
    for (s, x) in paths
        .survival()
        .iter_rows()
        .zip(paths.fx_deviation().iter_rows())
    {
        let contribution: f64 = (1..dims.1)
            .map(|j| (s[j - 1] - s[j]) * forward.exposure(x[j]))
            .sum();
        acc.push(contribution);
    }
    Ok(acc.finish())
}

/// CVA from the directly simulated default time.
///
/// # Errors
///
/// Returns `XvaError` if the batch is empty, misshapen, or holds a default
/// index outside `[1, n_points)`.
pub fn cva_direct_default(
    paths: &SimulatedPaths,
    forward: &FxForward,
) -> Result<McEstimate, XvaError> {
    let dims = batch::dims(paths)?;
    batch::matrix("fx_plain", paths.fx_plain(), dims)?;
    batch::defaults("default_direct", paths.default_direct(), dims)?;

    let mut acc = MeanAccumulator::default();
    for (x, tau) in paths.fx_plain().iter_rows().zip(paths.default_direct()) {
        acc.push(exposure_at_default(x, *tau, forward));
    }
    Ok(acc.finish())
}

/// CVA from the importance-sampled default time, reweighted by the
/// likelihood ratio.
///
/// # Errors
///
/// Returns `XvaError` if the batch is empty, misshapen, or holds a default
/// index outside `[1, n_points)`.
pub fn cva_importance_default(
    paths: &SimulatedPaths,
    forward: &FxForward,
) -> Result<McEstimate, XvaError> {
    let dims = batch::dims(paths)?;
    batch::matrix("fx_importance", paths.fx_importance(), dims)?;
    batch::defaults("default_importance", paths.default_importance(), dims)?;
    batch::vector(
        "importance_weights",
        paths.importance_weights().len(),
        dims.0,
    )?;

    let mut acc = MeanAccumulator::default();
    for ((x, tau), w) in paths
        .fx_importance()
        .iter_rows()
        .zip(paths.default_importance())
        .zip(paths.importance_weights())
    {
        acc.push(w * exposure_at_default(x, *tau, forward));
    }
    Ok(acc.finish())
}

/// All three CVA estimates of one batch.
///
/// # Examples
///
/// ```
/// use pricer_core::types::TimeGrid;
/// use pricer_models::instruments::FxForward;
/// use pricer_models::models::CreditFxParams;
/// use pricer_pricing::mc::{generate_paths, SimulationConfig};
/// use pricer_xva::xva::cva_on_forward;
///
/// let grid = TimeGrid::linspace(0.0, 1.0, 13).unwrap();
/// let config = SimulationConfig::builder().n_paths(1_000).seed(3).build().unwrap();
/// let paths = generate_paths(&grid, &config, &CreditFxParams::default()).unwrap();
///
/// let forward = FxForward::new(10.0, 1e6).unwrap();
/// let cva = cva_on_forward(&paths, &forward).unwrap();
/// assert!(cva.hazard_weighted.value > 0.0);
/// assert!(cva.direct_default.value >= 0.0);
/// ```
pub fn cva_on_forward(
    paths: &SimulatedPaths,
    forward: &FxForward,
) -> Result<EstimatorTriple, XvaError> {
    Ok(EstimatorTriple {
        hazard_weighted: cva_hazard_weighted(paths, forward)?,
        direct_default: cva_direct_default(paths, forward)?,
        importance_default: cva_importance_default(paths, forward)?,
    })
}

#[inline]
fn exposure_at_default(fx: &[f64], tau: DefaultTime, forward: &FxForward) -> f64 {
    match tau {
        DefaultTime::At(j) => forward.exposure(fx[j]),
        DefaultTime::AfterMaturity => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xva::fixtures::{forward, two_path_batch, two_path_parts};
    use approx::assert_relative_eq;
    use pricer_pricing::mc::PathMatrix;

    #[test]
    fn test_hazard_weighted() {
        let est = cva_hazard_weighted(&two_path_batch(), &forward()).unwrap();
        // path 0: 0.1·5.6 + 0.1·4.3; path 1: 0.05·0 + 0.05·4
        assert_relative_eq!(est.value, 0.595, epsilon = 1e-10);
        assert!(est.std_error > 0.0);
    }

    #[test]
    fn test_direct_default() {
        let est = cva_direct_default(&two_path_batch(), &forward()).unwrap();
        // path 0 defaults at t1 with fx 12; path 1 survives
        assert_relative_eq!(est.value, 1.0, epsilon = 1e-12);
        assert_relative_eq!(est.std_error, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_importance_default() {
        let est = cva_importance_default(&two_path_batch(), &forward()).unwrap();
        // 0.4 · E(13) on path 0
        assert_relative_eq!(est.value, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_triple_matches_components() {
        let paths = two_path_batch();
        let triple = cva_on_forward(&paths, &forward()).unwrap();
        assert_eq!(
            triple.direct_default,
            cva_direct_default(&paths, &forward()).unwrap()
        );
    }

    #[test]
    fn test_out_of_the_money_forward_has_no_cva() {
        let deep_otm = FxForward::new(1_000.0, 1.0).unwrap();
        let triple = cva_on_forward(&two_path_batch(), &deep_otm).unwrap();
        for (_, est) in triple.iter() {
            assert_eq!(est.value, 0.0);
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let mut parts = two_path_parts();
        parts.fx_plain = PathMatrix::zeros(2, 2);
        let paths = SimulatedPaths::from_parts(parts);
        assert_eq!(
            cva_direct_default(&paths, &forward()),
            Err(XvaError::ShapeMismatch {
                field: "fx_plain",
                expected: (2, 3),
                got: (2, 2),
            })
        );

        let mut parts = two_path_parts();
        parts.importance_weights.pop();
        let paths = SimulatedPaths::from_parts(parts);
        assert!(matches!(
            cva_importance_default(&paths, &forward()),
            Err(XvaError::ShapeMismatch {
                field: "importance_weights",
                ..
            })
        ));
    }

    #[test]
    fn test_default_index_out_of_range() {
        for bad in [0, 3] {
            let mut parts = two_path_parts();
            parts.default_direct[1] = DefaultTime::At(bad);
            let paths = SimulatedPaths::from_parts(parts);
            assert_eq!(
                cva_direct_default(&paths, &forward()),
                Err(XvaError::DefaultIndexOutOfRange {
                    path: 1,
                    index: bad,
                    n_points: 3,
                })
            );
        }
    }

    #[test]
    fn test_empty_batch() {
        let paths = crate::xva::fixtures::empty_batch();
        assert_eq!(
            cva_hazard_weighted(&paths, &forward()),
            Err(XvaError::EmptyBatch)
        );
    }
}
