//! # Pricer Pricing (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing is the simulation engine of the layered workspace:
//! - Seeded pseudo-random number generation ([`rng`])
//! - Joint hazard-rate / FX path generation with a default jump ([`mc`])
//! - Direct and importance-sampled default-time inversion
//! - Monte Carlo estimates with standard errors
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `TimeGrid`, survival-probability maths
//! - Layer 2 (pricer_models): `CreditFxParams`, correlated Brownian drivers
//!
//! Layer 4 (pricer_xva) consumes [`mc::SimulatedPaths`] to compute CVA and FVA.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::TimeGrid;
//! use pricer_models::models::CreditFxParams;
//! use pricer_pricing::mc::{generate_paths, SimulationConfig};
//!
//! let grid = TimeGrid::linspace(0.0, 1.0, 13).unwrap();
//! let config = SimulationConfig::builder()
//!     .n_paths(500)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let paths = generate_paths(&grid, &config, &CreditFxParams::default()).unwrap();
//! assert_eq!(paths.n_paths(), 500);
//! assert_eq!(paths.hazard().shape(), (500, 13));
//! ```
//!
//! ## Execution Model
//!
//! Generation is single-threaded and consumes one RNG stream in path order,
//! so a fixed seed reproduces a batch exactly.

#![warn(missing_docs)]

pub mod mc;
pub mod rng;
