//! Funding Valuation Adjustment (FVA) of an FX forward.
//!
//! FVA accrues the funding spread on positive exposure while the counterparty
//! is alive. With accrual `a = spread·dt`, per simulation:
//!
//! ```text
//! hazard-weighted:    Σ_{j=1}^{n−1} S_j · E(x^dev_j / (1+J)) · a
//! direct default:     Σ_{j=1}^{m} E(x^plain_j) · a        m = τ, or n−1 if no default
//! importance default: w · Σ_{j=1}^{m'} E(x^imp_j) · a      m' from τ'
//! ```
//!
//! Dividing the deviation-weighted path by `1+J` undoes the jump it starts
//! with, leaving the pre-default FX level.

use pricer_models::instruments::FxForward;
use pricer_pricing::mc::{DefaultTime, McEstimate, MeanAccumulator, SimulatedPaths};

use super::batch;
use super::error::XvaError;
use super::params::FundingParams;
use super::result::EstimatorTriple;

/// FVA by survival weighting of the jump-removed deviation path.
///
/// # Errors
///
/// Returns `XvaError` if the batch is empty or its arrays are misshapen.
pub fn fva_hazard_weighted(
    paths: &SimulatedPaths,
    forward: &FxForward,
    funding: &FundingParams,
) -> Result<McEstimate, XvaError> {
    let dims = batch::dims(paths)?;
    batch::matrix("survival", paths.survival(), dims)?;
    batch::matrix("fx_deviation", paths.fx_deviation(), dims)?;

    let accrual = funding.accrual(paths.grid().dt());
    let jump = paths.params().jump_factor();

    let mut acc = MeanAccumulator::default();
    for (s, x) in paths
        .survival()
        .iter_rows()
        .zip(paths.fx_deviation().iter_rows())
    {
        let funded: f64 = (1..dims.1)
            .map(|j| s[j] * forward.exposure(x[j] / jump))
            .sum();
        acc.push(funded * accrual);
    }
    Ok(acc.finish())
}

/// FVA accrued along the plain FX path up to the direct default time.
///
/// # Errors
///
/// Returns `XvaError` if the batch is empty, misshapen, or holds a default
/// index outside `[1, n_points)`.
pub fn fva_direct_default(
    paths: &SimulatedPaths,
    forward: &FxForward,
    funding: &FundingParams,
) -> Result<McEstimate, XvaError> {
    let dims = batch::dims(paths)?;
    batch::matrix("fx_plain", paths.fx_plain(), dims)?;
    batch::defaults("default_direct", paths.default_direct(), dims)?;

    let accrual = funding.accrual(paths.grid().dt());

    let mut acc = MeanAccumulator::default();
    for (x, tau) in paths.fx_plain().iter_rows().zip(paths.default_direct()) {
        acc.push(funded_exposure(x, *tau, forward) * accrual);
    }
    Ok(acc.finish())
}

/// FVA accrued along the importance FX path, reweighted by the likelihood
/// ratio.
///
/// # Errors
///
/// Returns `XvaError` if the batch is empty, misshapen, or holds a default
/// index outside `[1, n_points)`.
pub fn fva_importance_default(
    paths: &SimulatedPaths,
    forward: &FxForward,
    funding: &FundingParams,
) -> Result<McEstimate, XvaError> {
    let dims = batch::dims(paths)?;
    batch::matrix("fx_importance", paths.fx_importance(), dims)?;
    batch::defaults("default_importance", paths.default_importance(), dims)?;
    batch::vector(
        "importance_weights",
        paths.importance_weights().len(),
        dims.0,
    )?;

    let accrual = funding.accrual(paths.grid().dt());

    let mut acc = MeanAccumulator::default();
    for ((x, tau), w) in paths
        .fx_importance()
        .iter_rows()
        .zip(paths.default_importance())
        .zip(paths.importance_weights())
    {
        acc.push(w * funded_exposure(x, *tau, forward) * accrual);
    }
    Ok(acc.finish())
}

/// All three FVA estimates of one batch.
///
/// # Errors
///
/// Returns `XvaError` if any estimator rejects the batch.
pub fn fva_on_forward(
    paths: &SimulatedPaths,
    forward: &FxForward,
    funding: &FundingParams,
) -> Result<EstimatorTriple, XvaError> {
    Ok(EstimatorTriple {
        hazard_weighted: fva_hazard_weighted(paths, forward, funding)?,
        direct_default: fva_direct_default(paths, forward, funding)?,
        importance_default: fva_importance_default(paths, forward, funding)?,
    })
}

/// Σ_{j=1}^{m} E(x_j), up to the default index or the last grid point.
#[inline]
fn funded_exposure(fx: &[f64], tau: DefaultTime, forward: &FxForward) -> f64 {
    let last = match tau {
        DefaultTime::At(j) => j,
        DefaultTime::AfterMaturity => fx.len() - 1,
    };
    fx[1..=last].iter().map(|&x| forward.exposure(x)).sum()
}
