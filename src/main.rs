#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use atlasmeasure::config::{self, load_configuration};
use atlasmeasure::datamodel::measurement_types::registry;
use atlasmeasure::datamodel::{Measurement, Period};
use atlasmeasure::parsing::MeasurementsResponse;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{Level, event};

#[derive(Debug, Parser)]
#[command(name = "atlasmeasure", version, about = "Summarize Atlas measurements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the measurement type identifiers
    Types {
        /// Category path, such as CPU/Process
        #[arg(long)]
        category: Option<String>,
    },
    /// Summarize a measurements document saved from the API
    Summarize {
        file: PathBuf,
        /// Period the document covers, defaults to the configured one
        #[arg(long)]
        period: Option<String>,
        /// Print the full JSON report instead of the summary table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    load_configuration().context("Failed to load configuration")?;
    let config = config::get().context("Failed to get configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Types { category } => list_types(category.as_deref()),
        Command::Summarize { file, period, json } => {
            let period = match period {
                Some(period) => Period::from_str(&period)?,
                None => config
                    .parse_default_period()
                    .context("Invalid default period in configuration")?,
            };
            summarize(&file, period, config.strict_registry, json)
        }
    }
}

fn list_types(category: Option<&str>) -> Result<()> {
    let path: Vec<&str> = category
        .map(|c| c.split('/').filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();
    let node = registry().find_category(&path)?;
    for identifier in node.enumerate_leaves() {
        println!("{}", identifier);
    }
    Ok(())
}

fn summarize(file: &Path, period: Period, strict: bool, json: bool) -> Result<()> {
    let data = std::fs::read(file)
        .with_context(|| format!("Failed to read measurements from {}", file.display()))?;
    let measurements = MeasurementsResponse::from_slice(&data)
        .context("Failed to decode measurements document")?
        .into_measurements(period, strict)?;
    event!(
        Level::INFO,
        "Decoded {} measurements from {}",
        measurements.len(),
        file.display()
    );

    if json {
        let reports: Vec<_> = measurements.iter().map(Measurement::as_report).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for measurement in &measurements {
        let stats = measurement.stats_friendly();
        println!(
            "{:<48} samples={:<6} mean={:<14} min={:<14} max={}",
            measurement.name(),
            stats.samples,
            stats.mean,
            stats.min,
            stats.max
        );
    }
    Ok(())
}
