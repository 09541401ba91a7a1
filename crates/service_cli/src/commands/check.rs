//! Check command implementation
//!
//! Prints the effective settings as TOML, followed by quantities derived
//! from them, without simulating anything.

use std::io::Write;

use pricer_core::math::survival::{survival_probabilities, terminal_survival};

use crate::config::SimulationSettings;
use crate::Result;

/// Run the check command
pub fn run<W: Write>(settings: &SimulationSettings, out: &mut W) -> Result<()> {
    let grid = settings.time_grid()?;
    let params = settings.model_params()?;
    let forward = settings.forward()?;
    let funding = settings.funding()?;

    writeln!(out, "{}", toml::to_string_pretty(settings)?)?;

    // Survival to maturity at a frozen hazard rate
    let flat = vec![params.hazard0(); grid.len()];
    let mut survival = vec![0.0; grid.len()];
    survival_probabilities(&flat, grid.dt(), &mut survival);
    let flat_survival = terminal_survival(&survival);

    writeln!(out, "# Derived")?;
    writeln!(out, "# dt                      = {:.6}", grid.dt())?;
    writeln!(out, "# steps                   = {}", grid.n_steps())?;
    writeln!(out, "# jump factor (1+J)       = {:.6}", params.jump_factor())?;
    writeln!(out, "# exposure at fx0         = {:.4}", forward.exposure(params.fx0()))?;
    writeln!(out, "# funding accrual per dt  = {:.6}", funding.accrual(grid.dt()))?;
    writeln!(out, "# survival at flat hazard = {:.6}", flat_survival)?;
    match settings.simulation.seed {
        Some(seed) => writeln!(out, "# seed                    = {}", seed)?,
        None => writeln!(out, "# seed                    = <entropy>")?,
    }
    Ok(())
}
