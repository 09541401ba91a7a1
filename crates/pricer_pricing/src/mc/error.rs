//! Error types for the Monte Carlo engine.
//!
//! [`ConfigError`] covers invalid simulation settings detected at
//! construction; [`SimulationError`] is the umbrella returned by path
//! generation and wraps configuration and model errors.

use std::fmt;

use pricer_core::types::PricingError;
use thiserror::Error;

use super::config::MAX_PATHS;

/// Configuration error for the Monte Carlo engine.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside valid range [1, MAX_PATHS].
    InvalidPathCount(usize),
    /// Invalid parameter value with name and description.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPathCount(count) => {
                write!(
                    f,
                    "Invalid path count {}: must be in range [1, {}]",
                    count, MAX_PATHS
                )
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised while generating a simulation batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Invalid simulation configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid model parameter.
    #[error("Model error: {0}")]
    Model(#[from] PricingError),
}
