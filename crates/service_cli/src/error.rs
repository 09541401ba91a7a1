//! CLI error types

use pricer_pricing::mc::SimulationError;
use pricer_xva::XvaError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `defaultsim` commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be loaded or are invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Path generation failed
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    /// Estimation failed
    #[error("XVA estimation failed: {0}")]
    Xva(#[from] XvaError),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing results failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML serialisation failed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
