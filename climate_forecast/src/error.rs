//! Error types for the climate_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Message shown to the user when the forecast horizon is rejected
pub const INVALID_HORIZON_MESSAGE: &str = "Please enter a valid number of future periods.";

/// Broad category of a [`ForecastError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The forecast horizon typed by the user was rejected
    InputValidation,
    /// The historical dataset could not be found, read or parsed
    DataLoad,
    /// The model could not be fitted to the historical series
    ModelFit,
    /// Invariant violations and output failures
    Internal,
}

/// Custom error types for the climate_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The horizon input is not a non-negative integer
    #[error("Please enter a valid number of future periods. (got {0:?})")]
    InvalidHorizon(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Malformed configuration file
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Not enough observations for the requested model order
    #[error("Insufficient data for {model}: need at least {required} observations, got {actual}")]
    InsufficientData {
        model: String,
        required: usize,
        actual: usize,
    },

    /// Fitting failed or produced degenerate parameters
    #[error("Model fit error: {0}")]
    ModelFitError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Error from CSV export
    #[error("CSV error: {0}")]
    CsvError(String),
}

impl ForecastError {
    /// Map the error onto its category
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForecastError::InvalidHorizon(_) => ErrorKind::InputValidation,
            ForecastError::DataError(_)
            | ForecastError::IoError(_)
            | ForecastError::PolarsError(_)
            | ForecastError::ConfigError(_) => ErrorKind::DataLoad,
            ForecastError::InsufficientData { .. } | ForecastError::ModelFitError(_) => {
                ErrorKind::ModelFit
            }
            ForecastError::ValidationError(_)
            | ForecastError::SerializationError(_)
            | ForecastError::CsvError(_) => ErrorKind::Internal,
        }
    }

    /// Whether the error came from user input rather than data or model
    pub fn is_input_error(&self) -> bool {
        self.kind() == ErrorKind::InputValidation
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}
