//! defaultsim - Command Line Driver for the Default-Simulation XVA Experiment
//!
//! Prices CVA and FVA on an FX forward under a joint lognormal hazard-rate
//! and FX model with a devaluation jump at default, using three estimators
//! on the same simulated batch.
//!
//! # Commands
//!
//! - `defaultsim estimate` - Simulate one batch and report all estimators
//! - `defaultsim convergence` - Sweep the path count over `⌊2^(i/2)⌋`
//! - `defaultsim check` - Print the effective settings
//!
//! # Configuration
//!
//! Settings come from built-in defaults, an optional `--config` TOML file,
//! `DEFAULTSIM_*` environment variables and flags, later sources winning.
//! `RUST_LOG` overrides the configured log level.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{build_config, CliOverrides, SimulationSettings};
use output::OutputFormat;

/// Default-simulation CVA/FVA engine
#[derive(Parser)]
#[command(name = "defaultsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one batch and report CVA and FVA
    Estimate {
        /// Number of Monte Carlo paths
        #[arg(short, long)]
        num_paths: Option<usize>,

        /// RNG seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Sweep the number of paths and report every estimator at each count
    Convergence {
        /// First exponent i of N = floor(2^(i/2))
        #[arg(long, default_value_t = 20)]
        first_exponent: u32,

        /// Last exponent i of N = floor(2^(i/2))
        #[arg(long, default_value_t = 38)]
        last_exponent: u32,

        /// Base RNG seed; point k uses seed + k
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check configuration and print the effective settings
    Check,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let (num_paths, seed) = match &self.command {
            Commands::Estimate {
                num_paths, seed, ..
            } => (*num_paths, *seed),
            Commands::Convergence { seed, .. } => (None, *seed),
            Commands::Check => (None, None),
        };
        CliOverrides {
            config_file: self.config.clone(),
            num_paths,
            seed,
            verbose: self.verbose,
        }
    }
}

fn init_tracing(settings: &SimulationSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = build_config(&cli.overrides())?;

    init_tracing(&settings);
    debug!(?settings, "Effective settings");
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Estimate { format, .. } => {
            let stdout = io::stdout();
            commands::estimate::run(&settings, format, &mut stdout.lock())
        }
        Commands::Convergence {
            first_exponent,
            last_exponent,
            format,
            output,
            ..
        } => commands::convergence::run(
            &settings,
            first_exponent,
            last_exponent,
            format,
            output.as_deref(),
        ),
        Commands::Check => {
            let stdout = io::stdout();
            commands::check::run(&settings, &mut stdout.lock())
        }
    }
}
