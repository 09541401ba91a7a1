//! Numerical utilities shared by the simulation and XVA layers.
//!
//! - `survival`: cumulative-hazard integration, marginal default
//!   probabilities and survival-quantile inversion

pub mod survival;
