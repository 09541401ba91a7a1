//! # Pricer XVA (L4: Application)
//!
//! CVA and FVA of an FX forward from a simulated default batch.
//!
//! This crate provides:
//! - Three CVA and three FVA estimators over the same batch
//! - Funding parameters and structured results with standard errors
//! - A convergence sweep over simulation counts
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_xva (L4)              │
//! ├─────────────────────────────────────────┤
//! │  xva/         - CVA, FVA estimators     │
//! │  convergence  - sweep over path counts  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │          pricer_pricing (L3)            │
//! │  Credit/FX Monte Carlo engine           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::TimeGrid;
//! use pricer_models::instruments::FxForward;
//! use pricer_models::models::CreditFxParams;
//! use pricer_xva::convergence::ConvergenceSweep;
//! use pricer_xva::xva::{Estimator, FundingParams};
//!
//! let grid = TimeGrid::linspace(0.0, 1.0, 13).unwrap();
//! let series = ConvergenceSweep::half_powers(12, 14)
//!     .unwrap()
//!     .run(
//!         &grid,
//!         &CreditFxParams::default(),
//!         &FxForward::new(10.0, 1e6).unwrap(),
//!         &FundingParams::new(0.02).unwrap(),
//!         Some(42),
//!     )
//!     .unwrap();
//!
//! for (n_paths, cva) in series.cva_series(Estimator::ImportanceDefault) {
//!     println!("{n_paths:>8} {:>12.2} ± {:.2}", cva.value, cva.std_error);
//! }
//! ```

#![warn(missing_docs)]

pub mod convergence;
pub mod xva;

// Re-export commonly used types
pub use convergence::{ConvergencePoint, ConvergenceSeries, ConvergenceSweep};
pub use xva::{
    EstimatorTriple, ForwardXvaCalculator, FundingParams, XvaError, XvaEstimates,
};
