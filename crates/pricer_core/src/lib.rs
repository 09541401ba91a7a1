//! # pricer_core: Foundation for Default-Simulation XVA
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricer stack and provides:
//! - Error types: `PricingError`, `GridError` (`types::error`)
//! - Uniform simulation grids: `TimeGrid` (`types::time_grid`)
//! - Survival-probability integration and inverse lookup (`math::survival`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::survival::{first_default_index, survival_probabilities};
//! use pricer_core::types::TimeGrid;
//!
//! let grid = TimeGrid::linspace(0.0, 1.0, 5).unwrap();
//! let hazard = [0.5_f64; 5];
//! let mut survival = [0.0_f64; 5];
//! survival_probabilities(&hazard, grid.dt(), &mut survival);
//!
//! assert_eq!(survival[0], 1.0);
//! // A quantile above S(t1) defaults in the first interval
//! assert_eq!(first_default_index(&survival, 0.95), Some(1));
//! // A quantile below terminal survival never defaults
//! assert_eq!(first_default_index(&survival, 0.1), None);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `TimeGrid`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod types;
