//! XVA calculations (CVA, FVA) on a simulated default batch.
//!
//! # Supported Metrics
//!
//! - **CVA** (Credit Valuation Adjustment): expected exposure at default
//! - **FVA** (Funding Valuation Adjustment): funding spread accrued on
//!   positive exposure while the counterparty survives
//!
//! Each metric is estimated three ways from the same
//! [`SimulatedPaths`](pricer_pricing::mc::SimulatedPaths) batch:
//!
//! | Estimator | FX path | Default information |
//! |-----------|---------|---------------------|
//! | [`Estimator::HazardWeighted`] | deviation-weighted | survival curve |
//! | [`Estimator::DirectDefault`] | plain | simulated default time |
//! | [`Estimator::ImportanceDefault`] | importance | importance-sampled default time, reweighted |
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │             ForwardXvaCalculator             │
//! ├──────────────────────────────────────────────┤
//! │  Inputs:                                     │
//! │    - SimulatedPaths (L3)                     │
//! │    - FxForward (strike, notional)            │
//! │    - FundingParams (spread)                  │
//! ├──────────────────────────────────────────────┤
//! │  Outputs:                                    │
//! │    - XvaEstimates { cva, fva }               │
//! │      each an EstimatorTriple of McEstimate   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use pricer_core::types::TimeGrid;
//! use pricer_models::instruments::FxForward;
//! use pricer_models::models::CreditFxParams;
//! use pricer_pricing::mc::{generate_paths, SimulationConfig};
//! use pricer_xva::xva::{ForwardXvaCalculator, FundingParams};
//!
//! let grid = TimeGrid::linspace(0.0, 1.0, 13).unwrap();
//! let config = SimulationConfig::builder().n_paths(2_000).seed(1).build().unwrap();
//! let paths = generate_paths(&grid, &config, &CreditFxParams::default()).unwrap();
//!
//! let calculator = ForwardXvaCalculator::new(
//!     FxForward::new(10.0, 1e6).unwrap(),
//!     FundingParams::new(0.02).unwrap(),
//! );
//! let xva = calculator.compute(&paths).unwrap();
//!
//! assert!(xva.cva.hazard_weighted.value > 0.0);
//! assert!(xva.fva.hazard_weighted.value > 0.0);
//! ```

mod batch;
mod cva;
mod error;
mod fva;
mod params;
mod result;

pub use cva::{cva_direct_default, cva_hazard_weighted, cva_importance_default, cva_on_forward};
pub use error::XvaError;
pub use fva::{fva_direct_default, fva_hazard_weighted, fva_importance_default, fva_on_forward};
pub use params::FundingParams;
pub use result::{Estimator, EstimatorTriple, XvaEstimates};

use pricer_models::instruments::FxForward;
use pricer_pricing::mc::SimulatedPaths;

/// CVA and FVA calculator for a single FX forward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForwardXvaCalculator {
    forward: FxForward,
    funding: FundingParams,
}

impl ForwardXvaCalculator {
    /// Creates a calculator.
    pub fn new(forward: FxForward, funding: FundingParams) -> Self {
        Self { forward, funding }
    }

    /// The forward being adjusted.
    #[inline]
    pub fn forward(&self) -> &FxForward {
        &self.forward
    }

    /// Funding parameters.
    #[inline]
    pub fn funding(&self) -> &FundingParams {
        &self.funding
    }

    /// Computes all CVA and FVA estimates for one batch.
    ///
    /// # Errors
    ///
    /// Returns `XvaError` if the batch is empty or inconsistent.
    pub fn compute(&self, paths: &SimulatedPaths) -> Result<XvaEstimates, XvaError> {
        let cva = cva_on_forward(paths, &self.forward)?;
        let fva = fva_on_forward(paths, &self.forward, &self.funding)?;

        tracing::debug!(
            n_paths = paths.n_paths(),
            cva_hazard = cva.hazard_weighted.value,
            cva_direct = cva.direct_default.value,
            cva_importance = cva.importance_default.value,
            fva_hazard = fva.hazard_weighted.value,
            fva_direct = fva.direct_default.value,
            fva_importance = fva.importance_default.value,
            "xva estimates"
        );
        Ok(XvaEstimates { cva, fva })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use pricer_core::types::TimeGrid;
    use pricer_models::instruments::FxForward;
    use pricer_models::models::CreditFxParams;
    use pricer_pricing::mc::{
        DefaultTime, PathMatrix, SamplingRegion, SimulatedPaths, SimulatedPathsParts,
    };

    /// Unit-notional forward struck at 10.
    pub(crate) fn forward() -> FxForward {
        FxForward::new(10.0, 1.0).unwrap()
    }

    /// Arrays of [`two_path_batch`], for tests that corrupt one of them.
    pub(crate) fn two_path_parts() -> SimulatedPathsParts {
        let rows = |a: [f64; 3], b: [f64; 3]| PathMatrix::from_rows(&[a, b]).unwrap();
        SimulatedPathsParts {
            grid: TimeGrid::linspace(0.0, 1.0, 3).unwrap(),
            params: CreditFxParams::default(),
            seed: 0,
            hazard: rows([0.2, 0.2, 0.2], [0.1, 0.1, 0.1]),
            survival: rows([1.0, 0.9, 0.8], [1.0, 0.95, 0.9]),
            fx_plain: rows([10.0, 12.0, 11.0], [10.0, 10.5, 9.0]),
            fx_importance: rows([10.0, 11.0, 13.0], [10.0, 9.0, 8.0]),
            fx_deviation: rows([13.0, 15.6, 14.3], [13.0, 9.0, 14.0]),
            default_direct: vec![DefaultTime::At(1), DefaultTime::AfterMaturity],
            default_importance: vec![DefaultTime::At(2), DefaultTime::AfterMaturity],
            regions: vec![SamplingRegion::Early, SamplingRegion::Late],
            importance_weights: vec![0.4, 1.8],
        }
    }

    /// Two hand-built simulations on `[0, 0.5, 1]` with jump 0.3.
    pub(crate) fn two_path_batch() -> SimulatedPaths {
        SimulatedPaths::from_parts(two_path_parts())
    }

    /// Batch with no simulations.
    pub(crate) fn empty_batch() -> SimulatedPaths {
        let empty = PathMatrix::zeros(0, 3);
        SimulatedPaths::from_parts(SimulatedPathsParts {
            grid: TimeGrid::linspace(0.0, 1.0, 3).unwrap(),
            params: CreditFxParams::default(),
            seed: 0,
            hazard: empty.clone(),
            survival: empty.clone(),
            fx_plain: empty.clone(),
            fx_importance: empty.clone(),
            fx_deviation: empty,
            default_direct: Vec::new(),
            default_importance: Vec::new(),
            regions: Vec::new(),
            importance_weights: Vec::new(),
        })
    }
}
