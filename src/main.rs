mod catalog;
mod data;
mod render;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use catalog::{ChartSpec, CHARTS};
use data::loader::load_series;
use render::render_series;

/// Render scaling charts from benchmark CSV logs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Subset of chart names to build (default: all).
    names: Vec<String>,

    /// Directory containing the benchmark CSV logs.
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // Failures never reach the exit status; every problem is a warning and
    // the process exits 0 so partial results trees still yield plots.
    run(&cli.names, &cli.results_dir);
}

/// Build every selected chart in catalog order. Charts are independent: a
/// failure in one is reported as a warning and the loop moves on.
fn run(names: &[String], results_dir: &Path) {
    let selected: Option<BTreeSet<&str>> = if names.is_empty() {
        None
    } else {
        Some(names.iter().map(String::as_str).collect())
    };

    if let Some(selected) = &selected {
        for name in selected {
            if !CHARTS.iter().any(|chart| chart.name == *name) {
                warn!("Unknown chart name '{name}' (known: {})", known_names());
            }
        }
    }

    let plot_dir = results_dir.join("plots");
    for spec in CHARTS {
        if let Some(selected) = &selected {
            if !selected.contains(spec.name) {
                continue;
            }
        }
        if let Err(err) = build_chart(spec, results_dir, &plot_dir) {
            warn!("Chart {} failed: {err:#}", spec.name);
        }
    }
}

fn known_names() -> String {
    CHARTS
        .iter()
        .map(|chart| chart.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, aggregate, and render one chart (plus its derived speedup chart when
/// configured). "No data" is a warning, not an error.
fn build_chart(spec: &ChartSpec, results_dir: &Path, plot_dir: &Path) -> Result<()> {
    let Some(series) = load_series(results_dir, spec.patterns, spec.xcol, spec.y_candidates)?
    else {
        warn!("No data for {}; skipping plot", spec.title);
        return Ok(());
    };

    std::fs::create_dir_all(plot_dir)
        .with_context(|| format!("creating {}", plot_dir.display()))?;

    let output = plot_dir.join(spec.filename);
    render_series(&series, spec.xlabel, spec.ylabel, spec.title, &output)?;
    println!("Wrote {}", output.display());

    if let Some(speedup_filename) = spec.speedup_filename {
        match series.speedup() {
            Some(speedup) => {
                let output = plot_dir.join(speedup_filename);
                let title = format!("{} Speedup", spec.title);
                render_series(&speedup, spec.xlabel, "Speedup (×)", &title, &output)?;
                println!("Wrote {}", output.display());
            }
            None => warn!(
                "Cannot derive speedup for {}: baseline time is not positive",
                spec.name
            ),
        }
    }
    Ok(())
}
