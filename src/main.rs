//! temp-forecast - monthly average temperature forecaster
//!
//! Usage:
//!   temp-forecast --data Boston_Climate.csv --periods 12
//!   temp-forecast --config forecast.toml --chart-out chart.json
//!   temp-forecast --interactive

mod cli;
mod commands;


use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use climate_forecast::{ForecastPipeline, PipelineConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use commands::{Outputs, APP_TITLE};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(io::stderr))
        .init();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(data) = &cli.data {
        config = config.with_data_path(data);
    }
    info!(data = %config.data_path.display(), order = %config.order, "configured");

    let pipeline = ForecastPipeline::new(config);
    let outputs = Outputs {
        chart: cli.chart_out.as_deref(),
        csv: cli.csv_out.as_deref(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", APP_TITLE)?;

    if cli.interactive {
        commands::cmd_interactive(&pipeline, io::stdin().lock(), &outputs, &mut out)?;
        Ok(())
    } else {
        commands::cmd_forecast(&pipeline, &cli.periods, &outputs, &mut out)
    }
}
