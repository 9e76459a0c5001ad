//! Command implementations for the temp-forecast binary

use std::fs::{self, File};
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use climate_forecast::error::INVALID_HORIZON_MESSAGE;
use climate_forecast::report::{self, ChartSpec, CHART_TITLE, TABLE_TITLE};
use climate_forecast::{ForecastPipeline, ForecastTable};
use tracing::{error, info};

pub const APP_TITLE: &str = "Average Temperature Forecasting App";

/// Where rendered output goes besides the terminal
#[derive(Debug, Default)]
pub struct Outputs<'a> {
    pub chart: Option<&'a Path>,
    pub csv: Option<&'a Path>,
}

/// Run the pipeline once for `periods` and render the result
pub fn cmd_forecast<W: Write>(
    pipeline: &ForecastPipeline,
    periods: &str,
    outputs: &Outputs<'_>,
    out: &mut W,
) -> Result<()> {
    let table = match pipeline.run(periods) {
        Ok(table) => table,
        Err(e) if e.is_input_error() => bail!(INVALID_HORIZON_MESSAGE),
        Err(e) => return Err(e).context("Forecast failed"),
    };

    render(&table, outputs, out)
}

/// Read one horizon per line, re-running the full pipeline for each.
///
/// Returns the number of forecasts rendered. Bad input and failed runs are
/// reported and the session continues; EOF ends it.
pub fn cmd_interactive<R: BufRead, W: Write>(
    pipeline: &ForecastPipeline,
    input: R,
    outputs: &Outputs<'_>,
    out: &mut W,
) -> Result<usize> {
    let mut rendered = 0;
    write!(out, "Enter future periods: ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        match pipeline.run(line) {
            Ok(table) => {
                render(&table, outputs, out)?;
                rendered += 1;
            }
            Err(e) if e.is_input_error() => writeln!(out, "{}", INVALID_HORIZON_MESSAGE)?,
            Err(e) => {
                error!(error = %e, "forecast failed");
                writeln!(out, "Forecast failed: {}", e)?;
            }
        }

        write!(out, "Enter future periods: ")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(rendered)
}

fn render<W: Write>(table: &ForecastTable, outputs: &Outputs<'_>, out: &mut W) -> Result<()> {
    writeln!(out, "{}", TABLE_TITLE)?;
    write!(out, "{}", table)?;

    if let Some(path) = outputs.chart {
        let chart = ChartSpec::from_table(table);
        fs::write(path, chart.to_json_pretty()?)
            .with_context(|| format!("Failed to write chart to {}", path.display()))?;
        writeln!(out, "{} written to {}", CHART_TITLE, path.display())?;
        info!(path = %path.display(), points = chart.point_count(), "chart written");
    }

    if let Some(path) = outputs.csv {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        report::write_csv(table, file)?;
        info!(path = %path.display(), rows = table.len(), "csv written");
    }

    Ok(())
}
