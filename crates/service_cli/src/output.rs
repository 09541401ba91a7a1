//! Result rendering: box-drawn tables, JSON and long-format CSV.

use std::io::Write;

use clap::ValueEnum;
use pricer_pricing::mc::McEstimate;
use pricer_xva::xva::{Estimator, EstimatorTriple, XvaEstimates};
use pricer_xva::ConvergenceSeries;
use serde::Serialize;

use crate::Result;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// One row per (metric, estimator)
    Csv,
}

/// Single-batch report
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    /// Number of simulations
    pub n_paths: usize,
    /// Seed the batch was simulated with
    pub seed: u64,
    /// Simulations defaulting before maturity, direct sampling
    pub direct_defaults: usize,
    /// Simulations defaulting before maturity, importance sampling
    pub importance_defaults: usize,
    /// CVA and FVA estimates
    #[serde(flatten)]
    pub estimates: XvaEstimates,
}

#[derive(Debug, Serialize)]
struct EstimateRow {
    metric: &'static str,
    estimator: &'static str,
    value: f64,
    std_error: f64,
}

#[derive(Debug, Serialize)]
struct ConvergenceRow {
    n_paths: usize,
    seed: u64,
    metric: &'static str,
    estimator: &'static str,
    value: f64,
    std_error: f64,
}

fn metrics(estimates: &XvaEstimates) -> [(&'static str, &EstimatorTriple); 2] {
    [("cva", &estimates.cva), ("fva", &estimates.fva)]
}

/// Writes a single-batch report
pub fn write_estimate<W: Write>(
    out: &mut W,
    report: &EstimateReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_estimate_table(out, report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for (metric, triple) in metrics(&report.estimates) {
                for (estimator, estimate) in triple.iter() {
                    writer.serialize(EstimateRow {
                        metric,
                        estimator: estimator.name(),
                        value: estimate.value,
                        std_error: estimate.std_error,
                    })?;
                }
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn write_estimate_table<W: Write>(out: &mut W, report: &EstimateReport) -> Result<()> {
    writeln!(
        out,
        "Paths: {}  Seed: {}  Defaults (direct/importance): {}/{}",
        report.n_paths, report.seed, report.direct_defaults, report.importance_defaults
    )?;
    writeln!(out, "┌────────┬────────────────────┬──────────────────┬──────────────┬──────────┐")?;
    writeln!(out, "│ Metric │ Estimator          │            Value │    Std error │ Rel err  │")?;
    writeln!(out, "├────────┼────────────────────┼──────────────────┼──────────────┼──────────┤")?;
    for (metric, triple) in metrics(&report.estimates) {
        for (estimator, estimate) in triple.iter() {
            write_table_row(out, metric, estimator, &estimate)?;
        }
    }
    writeln!(out, "└────────┴────────────────────┴──────────────────┴──────────────┴──────────┘")?;
    writeln!(
        out,
        "Estimator spread: CVA {:.2}%  FVA {:.2}%",
        100.0 * report.estimates.cva.max_relative_spread(),
        100.0 * report.estimates.fva.max_relative_spread()
    )?;
    Ok(())
}

fn write_table_row<W: Write>(
    out: &mut W,
    metric: &str,
    estimator: Estimator,
    estimate: &McEstimate,
) -> Result<()> {
    writeln!(
        out,
        "│ {:<6} │ {:<18} │ {:>16.4} │ {:>12.4} │ {:>7.2}% │",
        metric.to_uppercase(),
        estimator.to_string(),
        estimate.value,
        estimate.std_error,
        100.0 * estimate.relative_error()
    )?;
    Ok(())
}

/// Writes a convergence series
pub fn write_convergence<W: Write>(
    out: &mut W,
    series: &ConvergenceSeries,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_convergence_table(out, series)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, series)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for point in &series.points {
                for (metric, triple) in [("cva", &point.cva), ("fva", &point.fva)] {
                    for (estimator, estimate) in triple.iter() {
                        writer.serialize(ConvergenceRow {
                            n_paths: point.n_paths,
                            seed: point.seed,
                            metric,
                            estimator: estimator.name(),
                            value: estimate.value,
                            std_error: estimate.std_error,
                        })?;
                    }
                }
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn write_convergence_table<W: Write>(out: &mut W, series: &ConvergenceSeries) -> Result<()> {
    writeln!(
        out,
        "┌──────────┬──────────────┬──────────────┬──────────────┬──────────────┬──────────────┬──────────────┐"
    )?;
    writeln!(
        out,
        "│  N paths │   CVA hazard │   CVA direct │   CVA import │   FVA hazard │   FVA direct │   FVA import │"
    )?;
    writeln!(
        out,
        "├──────────┼──────────────┼──────────────┼──────────────┼──────────────┼──────────────┼──────────────┤"
    )?;
    for point in &series.points {
        write!(out, "│ {:>8} │", point.n_paths)?;
        for (_, estimate) in point.cva.iter().chain(point.fva.iter()) {
            write!(out, " {:>12.2} │", estimate.value)?;
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "└──────────┴──────────────┴──────────────┴──────────────┴──────────────┴──────────────┴──────────────┘"
    )?;
    Ok(())
}
