//! # Random Number Generation
//!
//! Seeded pseudo-random number generation for the Monte Carlo engine.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is seeded; the seed is kept for logging
//! - **Single stream**: draws are consumed in a fixed order per path
//! - **Static dispatch**: no `Box<dyn Trait>` in the simulation loop
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! // Create a seeded RNG for reproducible simulations
//! let mut rng = PricerRng::from_seed(12345);
//!
//! // Uniform in [0, 1) and in the open interval (0, 1)
//! let u = rng.gen_uniform();
//! let q = rng.gen_open_uniform();
//! assert!(q > 0.0 && q < 1.0);
//!
//! // Standard normal variate (mean=0, std=1)
//! let z = rng.gen_normal();
//! # let _ = (u, z);
//! ```
//!
//! Normal sampling uses the Ziggurat algorithm via `rand_distr::StandardNormal`.

mod prng;

pub use prng::PricerRng;
