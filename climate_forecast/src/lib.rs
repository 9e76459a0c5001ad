//! # Climate Forecast
//!
//! Forecasting of monthly average temperature series with a fixed-order
//! ARIMA model.
//!
//! ## Features
//!
//! - Loading and cleaning of historical spreadsheets (CSV)
//! - ARIMA(p,d,q) fitting by conditional sum of squares, default order (4,1,3)
//! - Alignment of point forecasts with the following month starts
//! - Table, chart and CSV shapes for renderers
//!
//! ## Quick Start
//!
//! ```no_run
//! use climate_forecast::{ForecastPipeline, PipelineConfig};
//!
//! let config = PipelineConfig::default().with_data_path("Boston_Climate.csv");
//! let table = ForecastPipeline::new(config).run("10")?;
//!
//! for row in table.rows() {
//!     println!("{} {} {:.2}", row.index, row.date, row.forecasted_temperature);
//! }
//! # Ok::<(), climate_forecast::ForecastError>(())
//! ```
//!
//! Each step is also usable on its own:
//!
//! ```no_run
//! use climate_forecast::config::ColumnNames;
//! use climate_forecast::models::arima::ArimaModel;
//! use climate_forecast::{DataLoader, ForecastModel, ForecastTable, TrainedForecastModel};
//!
//! let series = DataLoader::from_csv("Boston_Climate.csv", &ColumnNames::default())?;
//! let fitted = ArimaModel::default().train(&series)?;
//! let forecast = fitted.forecast(3)?;
//! let table = ForecastTable::align(series.last_date().unwrap(), forecast.values())?;
//! # Ok::<(), climate_forecast::ForecastError>(())
//! ```

pub mod calendar;
pub mod config;
pub mod data;
pub mod error;
pub mod horizon;
pub mod models;
pub mod optimize;
pub mod pipeline;
pub mod report;
pub mod table;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{ArimaOrder, PipelineConfig};
pub use crate::data::{DataLoader, HistoricalSeries};
pub use crate::error::{ErrorKind, ForecastError};
pub use crate::horizon::Horizon;
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::pipeline::ForecastPipeline;
pub use crate::table::{ForecastRow, ForecastTable};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
