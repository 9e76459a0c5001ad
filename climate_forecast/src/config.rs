//! Pipeline configuration
//!
//! Everything here has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! data_path = "Boston_Climate.csv"
//!
//! [columns]
//! date = "Date"
//! value = "Temp_Avg"
//!
//! [order]
//! p = 4
//! d = 1
//! q = 3
//! ```

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Autoregressive order chosen by the offline parameter search
pub const AR_ORDER: usize = 4;
/// Differencing order chosen by the offline parameter search
pub const DIFFERENCING_ORDER: usize = 1;
/// Moving-average order chosen by the offline parameter search
pub const MA_ORDER: usize = 3;

/// Default location of the historical dataset
pub const DEFAULT_DATA_PATH: &str = "Boston_Climate.csv";

/// Order (p, d, q) of an ARIMA model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    /// AR order
    pub p: usize,
    /// Differencing order
    pub d: usize,
    /// MA order
    pub q: usize,
}

impl ArimaOrder {
    pub const fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Smallest series length the order can be fitted to
    pub fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 1
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(AR_ORDER, DIFFERENCING_ORDER, MA_ORDER)
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

/// Settings for the Nelder-Mead simplex used during fitting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NelderMeadConfig {
    /// Maximum number of simplex iterations
    pub max_iter: usize,
    /// Stop once the spread of objective values falls below this
    pub tolerance: f64,
    /// Edge length of the initial simplex
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 2000,
            tolerance: 1e-10,
            initial_step: 0.1,
        }
    }
}

/// Names of the columns the pipeline reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub date: String,
    pub value: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            value: "Temp_Avg".to_string(),
        }
    }
}

/// Full configuration of one forecasting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Spreadsheet holding the historical series
    pub data_path: PathBuf,
    pub columns: ColumnNames,
    pub order: ArimaOrder,
    pub optimizer: NelderMeadConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            columns: ColumnNames::default(),
            order: ArimaOrder::default(),
            optimizer: NelderMeadConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ForecastError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Override the dataset location
    pub fn with_data_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_path = path.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.columns.date.is_empty() || self.columns.value.is_empty() {
            return Err(ForecastError::ConfigError(
                "Column names must not be empty".to_string(),
            ));
        }
        if self.columns.date == self.columns.value {
            return Err(ForecastError::ConfigError(format!(
                "Date and value column are both '{}'",
                self.columns.date
            )));
        }
        if !(self.optimizer.tolerance > 0.0) || !(self.optimizer.initial_step > 0.0) {
            return Err(ForecastError::ConfigError(
                "Optimizer tolerance and initial_step must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_is_4_1_3() {
        let order = ArimaOrder::default();
        assert_eq!((order.p, order.d, order.q), (4, 1, 3));
        assert_eq!(order.to_string(), "ARIMA(4,1,3)");
        assert_eq!(order.min_observations(), 9);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = PipelineConfig::from_toml_str(
            r#"
            data_path = "data/boston.csv"

            [columns]
            value = "Temperature"

            [order]
            p = 2
            d = 1
            q = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("data/boston.csv"));
        assert_eq!(config.columns.date, "Date");
        assert_eq!(config.columns.value, "Temperature");
        assert_eq!(config.order, ArimaOrder::new(2, 1, 1));
        assert_eq!(config.optimizer, NelderMeadConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = PipelineConfig::from_toml_str("[columns]\ndate = \"X\"\nvalue = \"X\"\n")
            .unwrap_err();
        assert!(matches!(err, ForecastError::ConfigError(_)));

        let err = PipelineConfig::from_toml_str("order = 3").unwrap_err();
        assert!(matches!(err, ForecastError::ConfigError(_)));
    }
}
