//! Simulation settings
//!
//! Settings are assembled from, in order of increasing priority: built-in
//! defaults, an optional TOML file, `DEFAULTSIM_*` environment variables and
//! command-line flags.
//!
//! ```toml
//! log_level = "info"
//!
//! [model]
//! fx0 = 10.0
//! hazard0 = 0.01
//! vol_hazard = 0.4
//! vol_fx = 0.15
//! rho = 0.0
//! jump = 0.3
//!
//! [grid]
//! start = 0.0
//! end = 1.0
//! points = 13
//!
//! [forward]
//! strike = 10.0
//! notional = 1000000.0
//!
//! [funding]
//! spread = 0.02
//!
//! [simulation]
//! num_paths = 10000
//! seed = 42
//! ```

use pricer_core::types::TimeGrid;
use pricer_models::instruments::FxForward;
use pricer_models::models::CreditFxParams;
use pricer_pricing::mc::SimulationConfig;
use pricer_xva::FundingParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the seed
pub const ENV_SEED: &str = "DEFAULTSIM_SEED";
/// Environment variable overriding the path count
pub const ENV_NUM_PATHS: &str = "DEFAULTSIM_NUM_PATHS";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "DEFAULTSIM_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// File could not be read or parsed
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable could not be parsed
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// A section holds values the model rejects
    #[error("Invalid [{section}] settings: {reason}")]
    InvalidValue {
        /// TOML section
        section: &'static str,
        /// Underlying validation failure
        reason: String,
    },
}

impl ConfigError {
    fn invalid(section: &'static str, err: impl std::fmt::Display) -> Self {
        ConfigError::InvalidValue {
            section,
            reason: err.to_string(),
        }
    }
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Engine diagnostics
    Debug,
    /// Progress messages
    #[default]
    Info,
    /// Warnings only
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `[model]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Initial FX level
    pub fx0: f64,
    /// Initial hazard rate
    pub hazard0: f64,
    /// Hazard-rate volatility
    pub vol_hazard: f64,
    /// FX volatility
    pub vol_fx: f64,
    /// Hazard/FX Brownian correlation
    pub rho: f64,
    /// Relative FX jump at default
    pub jump: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        let params = CreditFxParams::default();
        Self {
            fx0: params.fx0(),
            hazard0: params.hazard0(),
            vol_hazard: params.vol_hazard(),
            vol_fx: params.vol_fx(),
            rho: params.rho(),
            jump: params.jump(),
        }
    }
}

/// `[grid]` section: uniform grid from valuation date to maturity
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridSettings {
    /// Valuation time
    pub start: f64,
    /// Forward maturity
    pub end: f64,
    /// Number of grid points, both ends included
    pub points: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
            points: 13,
        }
    }
}

/// `[forward]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardSettings {
    /// Strike
    pub strike: f64,
    /// Notional in foreign currency
    pub notional: f64,
}

impl Default for ForwardSettings {
    fn default() -> Self {
        Self {
            strike: 10.0,
            notional: 1_000_000.0,
        }
    }
}

/// `[funding]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FundingSettings {
    /// Annualised funding spread
    pub spread: f64,
}

impl Default for FundingSettings {
    fn default() -> Self {
        Self { spread: 0.02 }
    }
}

/// `[simulation]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationSection {
    /// Number of Monte Carlo paths
    pub num_paths: usize,
    /// RNG seed; drawn from entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            num_paths: 10_000,
            seed: None,
        }
    }
}

/// Complete `defaultsim` settings
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Log level used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Joint credit/FX model
    pub model: ModelSettings,
    /// Simulation grid
    pub grid: GridSettings,
    /// FX forward
    pub forward: ForwardSettings,
    /// Funding spread
    pub funding: FundingSettings,
    /// Batch size and seed
    pub simulation: SimulationSection,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl SimulationSettings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let settings: SimulationSettings = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Apply `DEFAULTSIM_*` overrides from `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.simulation.seed = Some(seed.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("{}={} is not a u64", ENV_SEED, seed))
            })?);
        }
        if let Some(n) = lookup(ENV_NUM_PATHS) {
            self.simulation.num_paths = n.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("{}={} is not a path count", ENV_NUM_PATHS, n))
            })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(n) = cli.num_paths {
            self.simulation.num_paths = n;
        }
        if let Some(seed) = cli.seed {
            self.simulation.seed = Some(seed);
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
    }

    /// Validate every section against the model constructors
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time_grid()?;
        self.model_params()?;
        self.forward()?;
        self.funding()?;
        self.simulation_config()?;
        Ok(())
    }

    /// Simulation grid
    pub fn time_grid(&self) -> Result<TimeGrid, ConfigError> {
        TimeGrid::linspace(self.grid.start, self.grid.end, self.grid.points)
            .map_err(|e| ConfigError::invalid("grid", e))
    }

    /// Model parameters
    pub fn model_params(&self) -> Result<CreditFxParams, ConfigError> {
        let m = &self.model;
        CreditFxParams::new(m.hazard0, m.fx0, m.vol_hazard, m.vol_fx, m.rho, m.jump)
            .map_err(|e| ConfigError::invalid("model", e))
    }

    /// FX forward
    pub fn forward(&self) -> Result<FxForward, ConfigError> {
        FxForward::new(self.forward.strike, self.forward.notional)
            .map_err(|e| ConfigError::invalid("forward", e))
    }

    /// Funding parameters
    pub fn funding(&self) -> Result<FundingParams, ConfigError> {
        FundingParams::new(self.funding.spread).map_err(|e| ConfigError::invalid("funding", e))
    }

    /// Monte Carlo configuration
    pub fn simulation_config(&self) -> Result<SimulationConfig, ConfigError> {
        SimulationConfig::builder()
            .n_paths(self.simulation.num_paths)
            .maybe_seed(self.simulation.seed)
            .build()
            .map_err(|e| ConfigError::invalid("simulation", e))
    }
}

/// Command-line overrides
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Path count override
    pub num_paths: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Raise the log level to debug
    pub verbose: bool,
}

/// Build settings from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<SimulationSettings, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliOverrides, lookup: F) -> Result<SimulationSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match &cli.config_file {
        Some(path) => SimulationSettings::from_file(path)?,
        None => SimulationSettings::default(),
    };

    settings.apply_env_with(lookup)?;
    settings.merge_with_cli(cli);
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_settings_match_experiment() {
        let settings = SimulationSettings::default();
        assert_eq!(settings.log_level, LogLevel::Info);
        assert_eq!(settings.model.fx0, 10.0);
        assert_eq!(settings.model.hazard0, 0.01);
        assert_eq!(settings.model.vol_hazard, 0.4);
        assert_eq!(settings.model.vol_fx, 0.15);
        assert_eq!(settings.model.rho, 0.0);
        assert_eq!(settings.model.jump, 0.3);
        assert_eq!(settings.grid.points, 13);
        assert_eq!(settings.forward.strike, 10.0);
        assert_eq!(settings.forward.notional, 1e6);
        assert_eq!(settings.funding.spread, 0.02);
        assert_eq!(settings.simulation.num_paths, 10_000);
        assert_eq!(settings.simulation.seed, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_derived_objects() {
        let settings = SimulationSettings::default();
        let grid = settings.time_grid().unwrap();
        assert_eq!(grid.len(), 13);
        assert_relative_eq!(grid.dt(), 1.0 / 12.0, epsilon = 1e-15);
        assert_eq!(settings.model_params().unwrap(), CreditFxParams::default());
        assert_eq!(settings.simulation_config().unwrap().n_paths(), 10_000);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let toml_str = r#"
            log_level = "DEBUG"

            [model]
            rho = -0.5

            [simulation]
            seed = 7
        "#;

        let settings: SimulationSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.model.rho, -0.5);
        // Unspecified fields keep their defaults
        assert_eq!(settings.model.jump, 0.3);
        assert_eq!(settings.grid, GridSettings::default());
        assert_eq!(settings.simulation.seed, Some(7));
        assert_eq!(settings.simulation.num_paths, 10_000);
    }

    #[test]
    fn test_toml_round_trip_through_check_output() {
        let mut settings = SimulationSettings::default();
        settings.simulation.seed = Some(3);
        let text = toml::to_string_pretty(&settings).unwrap();
        let back: SimulationSettings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_invalid_sections_rejected() {
        let mut settings = SimulationSettings::default();
        settings.model.rho = 1.5;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue {
                section: "model",
                ..
            })
        ));

        let mut settings = SimulationSettings::default();
        settings.grid.points = 1;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { section: "grid", .. })
        ));

        let mut settings = SimulationSettings::default();
        settings.simulation.num_paths = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue {
                section: "simulation",
                ..
            })
        ));

        let mut settings = SimulationSettings::default();
        settings.funding.spread = -0.01;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_SEED, "99"),
            (ENV_NUM_PATHS, "2048"),
            (ENV_LOG_LEVEL, "warn"),
        ]
        .into_iter()
        .collect();

        let mut settings = SimulationSettings::default();
        settings
            .apply_env_with(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.simulation.seed, Some(99));
        assert_eq!(settings.simulation.num_paths, 2048);
        assert_eq!(settings.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_bad_env_value() {
        let mut settings = SimulationSettings::default();
        let err = settings
            .apply_env_with(|key| (key == ENV_SEED).then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    }

    #[test]
    fn test_cli_takes_precedence_over_env() {
        let cli = CliOverrides {
            num_paths: Some(512),
            seed: Some(1),
            verbose: true,
            ..Default::default()
        };
        let settings = build_config_with(&cli, |key| match key {
            ENV_NUM_PATHS => Some("4096".to_string()),
            ENV_SEED => Some("2".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(settings.simulation.num_paths, 512);
        assert_eq!(settings.simulation.seed, Some(1));
        assert_eq!(settings.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_build_config_from_file() {
        let path = std::env::temp_dir().join(format!(
            "defaultsim-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[forward]\nstrike = 11.0\n").unwrap();

        let cli = CliOverrides {
            config_file: Some(path.clone()),
            ..Default::default()
        };
        let settings = build_config_with(&cli, no_env).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.forward.strike, 11.0);
        assert_eq!(settings.forward.notional, 1e6);
    }

    #[test]
    fn test_missing_file() {
        let cli = CliOverrides {
            config_file: Some(PathBuf::from("/nonexistent/defaultsim.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with(&cli, no_env),
            Err(ConfigError::FileError(_))
        ));
    }
}
