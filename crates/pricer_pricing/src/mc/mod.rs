//! Monte Carlo engine for default simulation.
//!
//! # Architecture
//!
//! ```text
//! generate_paths(grid, config, params)
//! ├── SimulationConfig      (path count, seed)
//! ├── PricerRng             (single stream, path order)
//! └── CreditFxPathGenerator
//!     ├── hazard / survival (pricer_core::math::survival)
//!     ├── sample_direct()      → DefaultTime
//!     ├── sample_importance()  → DefaultTime, SamplingRegion, weight
//!     └── plain / importance / deviation-weighted FX
//! ```
//!
//! The resulting [`SimulatedPaths`] holds every per-batch array as a
//! row-major [`PathMatrix`] or a per-simulation vector.
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::TimeGrid;
//! use pricer_models::models::CreditFxParams;
//! use pricer_pricing::mc::{generate_paths, McEstimate, SimulationConfig};
//!
//! let grid = TimeGrid::linspace(0.0, 1.0, 13).unwrap();
//! let config = SimulationConfig::builder().n_paths(2_000).seed(42).build().unwrap();
//! let paths = generate_paths(&grid, &config, &CreditFxParams::default()).unwrap();
//!
//! // Mean importance weight is one in expectation
//! let w = McEstimate::from_samples(paths.importance_weights());
//! assert!((w.value - 1.0).abs() < 5.0 * w.std_error + 1e-12);
//! ```

mod config;
mod default_time;
mod error;
mod estimate;
mod matrix;
mod paths;

pub use config::{SimulationConfig, SimulationConfigBuilder, MAX_PATHS};
pub use default_time::{
    sample_direct, sample_importance, DefaultTime, ImportanceDraw, SamplingRegion,
    MIXTURE_PROBABILITY,
};
pub use error::{ConfigError, SimulationError};
pub use estimate::{McEstimate, MeanAccumulator};
pub use matrix::PathMatrix;
pub use paths::{generate_paths, CreditFxPathGenerator, SimulatedPaths, SimulatedPathsParts};
