//! Core error and time types.
//!
//! This module provides:
//! - `error`: Structured error types for pricing inputs and grid construction
//! - `time_grid`: Validated uniform simulation grid
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`PricingError`], [`GridError`] from `error`
//! - [`TimeGrid`] from `time_grid`

pub mod error;
pub mod time_grid;

pub use error::{GridError, PricingError};
pub use time_grid::TimeGrid;
