//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::Parser;

/// Forecast monthly average temperatures with ARIMA(4,1,3)
#[derive(Debug, Parser)]
#[command(name = "temp-forecast")]
#[command(about = "Average temperature forecasting from a monthly history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Historical data (CSV with Date and Temp_Avg columns); overrides the config file
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Number of future monthly periods to forecast
    #[arg(short, long, default_value = "10", allow_hyphen_values = true)]
    pub periods: String,

    /// Write the Vega-Lite chart description to this file
    #[arg(long)]
    pub chart_out: Option<PathBuf>,

    /// Write the forecast table as CSV to this file
    #[arg(long)]
    pub csv_out: Option<PathBuf>,

    /// Read one horizon per line from stdin, re-running the forecast each time
    #[arg(short, long)]
    pub interactive: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
