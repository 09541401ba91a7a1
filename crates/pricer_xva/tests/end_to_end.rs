//! End-to-end CVA/FVA on the one-year experiment.

use pricer_core::types::TimeGrid;
use pricer_models::instruments::FxForward;
use pricer_models::models::CreditFxParams;
use pricer_pricing::mc::{generate_paths, McEstimate, SimulatedPaths, SimulationConfig};
use pricer_xva::convergence::ConvergenceSweep;
use pricer_xva::xva::{Estimator, EstimatorTriple, ForwardXvaCalculator, FundingParams};

fn experiment_grid() -> TimeGrid {
    TimeGrid::linspace(0.0, 1.0, 13).unwrap()
}

fn calculator() -> ForwardXvaCalculator {
    ForwardXvaCalculator::new(
        FxForward::new(10.0, 1e6).unwrap(),
        FundingParams::new(0.02).unwrap(),
    )
}

fn simulate(n_paths: usize, seed: u64) -> SimulatedPaths {
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .seed(seed)
        .build()
        .unwrap();
    generate_paths(&experiment_grid(), &config, &CreditFxParams::default()).unwrap()
}

/// Two estimates agree within 5% of the reference or four combined
/// standard errors, whichever is looser.
fn assert_consistent(name: &str, reference: McEstimate, other: McEstimate) {
    let noise = (reference.std_error.powi(2) + other.std_error.powi(2)).sqrt();
    let tolerance = (0.05 * reference.value.abs()).max(4.0 * noise);
    assert!(
        (reference.value - other.value).abs() <= tolerance,
        "{}: {} vs {} (tolerance {})",
        name,
        reference.value,
        other.value,
        tolerance
    );
}

/// Two estimates agree within `relative` of the reference, with no
/// allowance for sampling noise.
fn assert_within(name: &str, reference: McEstimate, other: McEstimate, relative: f64) {
    let gap = (reference.value - other.value).abs() / reference.value.abs();
    assert!(
        gap <= relative,
        "{}: {} vs {} (relative gap {:.4})",
        name,
        reference.value,
        other.value,
        gap
    );
}

fn assert_triple_consistent(name: &str, triple: &EstimatorTriple) {
    for (estimator, est) in triple.iter() {
        assert!(est.value >= 0.0, "{} {} negative", name, estimator);
        assert!(est.std_error.is_finite());
    }
    assert_consistent(name, triple.hazard_weighted, triple.importance_default);
    assert_consistent(name, triple.hazard_weighted, triple.direct_default);
}

#[test]
fn test_experiment_scenario() {
    let paths = simulate(10_000, 20_240_101);
    let xva = calculator().compute(&paths).unwrap();

    assert!(xva.cva.hazard_weighted.value > 0.0);
    assert!(xva.fva.hazard_weighted.value > 0.0);
    assert_triple_consistent("CVA", &xva.cva);
    assert_triple_consistent("FVA", &xva.fva);

    // The two low-variance CVA estimators agree tightly at this size
    assert_within(
        "CVA hazard vs importance",
        xva.cva.hazard_weighted,
        xva.cva.importance_default,
        0.05,
    );
}

#[test]
fn test_importance_sampling_reduces_cva_variance() {
    let paths = simulate(10_000, 77);
    let xva = calculator().compute(&paths).unwrap();
    assert!(xva.cva.importance_default.std_error < xva.cva.direct_default.std_error);
}

#[test]
fn test_single_simulation() {
    let paths = simulate(1, 5);
    let xva = calculator().compute(&paths).unwrap();

    for triple in [&xva.cva, &xva.fva] {
        for (_, est) in triple.iter() {
            assert!(est.value >= 0.0 && est.value.is_finite());
            assert_eq!(est.std_error, 0.0);
        }
    }
}

#[test]
fn test_standard_error_shrinks_with_paths() {
    let sweep = ConvergenceSweep::new(vec![1 << 10, 1 << 14]).unwrap();
    let series = sweep
        .run(
            &experiment_grid(),
            &CreditFxParams::default(),
            &FxForward::new(10.0, 1e6).unwrap(),
            &FundingParams::new(0.02).unwrap(),
            Some(9),
        )
        .unwrap();

    for estimator in [Estimator::HazardWeighted, Estimator::ImportanceDefault] {
        let cva = series.cva_series(estimator);
        let (small, large) = (cva[0].1, cva[1].1);
        // 16× the paths: expect roughly a quarter of the error
        assert!(
            large.std_error < 0.5 * small.std_error,
            "{}: {} vs {}",
            estimator,
            large.std_error,
            small.std_error
        );
    }
}

#[test]
fn test_reproducible_estimates() {
    let a = calculator().compute(&simulate(2_000, 31)).unwrap();
    let b = calculator().compute(&simulate(2_000, 31)).unwrap();
    assert_eq!(a, b);
}
