//! Foreign exchange instruments.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::fx::FxForward;
//!
//! let forward = FxForward::new(10.0, 1_000_000.0).unwrap();
//! assert_eq!(forward.exposure(10.5), 500_000.0);
//! assert_eq!(forward.exposure(9.5), 0.0);
//! ```

pub mod forward;

pub use forward::FxForward;
