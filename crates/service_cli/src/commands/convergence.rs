//! Convergence command implementation
//!
//! Sweeps the path count over `⌊2^(i/2)⌋` and reports every estimator at
//! each point.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use pricer_xva::{ConvergenceSeries, ConvergenceSweep};
use tracing::info;

use crate::config::SimulationSettings;
use crate::output::{write_convergence, OutputFormat};
use crate::{CliError, Result};

/// Runs the sweep for exponents `first..=last`
pub fn sweep(settings: &SimulationSettings, first: u32, last: u32) -> Result<ConvergenceSeries> {
    let sweep = ConvergenceSweep::half_powers(first, last)?;
    info!(
        points = sweep.path_counts().len(),
        max_paths = sweep.path_counts().last().copied().unwrap_or_default(),
        "Starting convergence sweep"
    );

    let series = sweep.run(
        &settings.time_grid()?,
        &settings.model_params()?,
        &settings.forward()?,
        &settings.funding()?,
        settings.simulation.seed,
    )?;
    Ok(series)
}

/// Run the convergence command
pub fn run(
    settings: &SimulationSettings,
    first: u32,
    last: u32,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    if first > last {
        return Err(CliError::InvalidArgument(format!(
            "--first-exponent {} is greater than --last-exponent {}",
            first, last
        )));
    }

    let series = sweep(settings, first, last)?;

    match output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_convergence(&mut out, &series, format)?;
            out.flush()?;
            info!("Results written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_convergence(&mut out, &series, format)?;
        }
    }
    Ok(())
}
