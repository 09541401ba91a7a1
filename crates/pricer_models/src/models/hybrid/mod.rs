//! Hybrid and correlated stochastic drivers.
//!
//! This module provides the two-factor correlation used to couple the
//! credit and FX Brownian motions.

pub mod correlated;

pub use correlated::{CorrelatedPair, CorrelationError};
