//! Stochastic models.
//!
//! - [`hybrid`]: correlated multi-factor drivers
//! - [`credit_fx`]: lognormal hazard rate coupled with an FX rate that
//!   devalues at default

pub mod credit_fx;
pub mod hybrid;

pub use credit_fx::{CreditFxParams, CreditFxStep};
pub use hybrid::{CorrelatedPair, CorrelationError};
