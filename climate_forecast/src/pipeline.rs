//! End-to-end forecasting run: validate, load, fit, forecast, align

use crate::calendar;
use crate::config::PipelineConfig;
use crate::data::{DataLoader, HistoricalSeries};
use crate::error::{ForecastError, Result};
use crate::horizon::Horizon;
use crate::models::arima::ArimaModel;
use crate::models::TrainedForecastModel;
use crate::table::ForecastTable;
use tracing::{debug, info};

/// Runs the forecasting steps from scratch on every call; nothing is kept
/// between runs
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    config: PipelineConfig,
}

impl ForecastPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Validate the raw horizon, then load, fit, forecast and align
    pub fn run(&self, horizon_input: &str) -> Result<ForecastTable> {
        let horizon = Horizon::parse(horizon_input)?;
        debug!(%horizon, "horizon accepted");

        let series = self.load()?;
        self.run_with_series(&series, horizon)
    }

    /// Load the historical series named in the configuration
    pub fn load(&self) -> Result<HistoricalSeries> {
        DataLoader::from_csv(&self.config.data_path, &self.config.columns)
    }

    /// Fit, forecast and align on an already loaded series
    pub fn run_with_series(
        &self,
        series: &HistoricalSeries,
        horizon: Horizon,
    ) -> Result<ForecastTable> {
        let last_date = series.last_date().ok_or_else(|| {
            ForecastError::DataError("Historical series has no dates".to_string())
        })?;
        if calendar::months_after(last_date, horizon.periods()).is_none() {
            return Err(ForecastError::InvalidHorizon(horizon.to_string()));
        }

        let model = ArimaModel::new(self.config.order).with_optimizer(self.config.optimizer);
        let fitted = model.fit(series.values())?;
        let forecast = fitted.forecast(horizon.periods())?;
        let table = ForecastTable::align(last_date, forecast.values())?;

        info!(
            model = fitted.name(),
            periods = table.len(),
            %last_date,
            "forecast ready"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn monthly_series(months: usize) -> HistoricalSeries {
        let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        let dates = crate::calendar::future_month_starts(start, months);
        let values = (0..months)
            .map(|i| 50.0 + 20.0 * (i as f64 * std::f64::consts::PI / 6.0).sin())
            .collect();
        HistoricalSeries::new(dates, values).unwrap()
    }

    #[test]
    fn test_invalid_horizon_stops_before_loading() {
        let config = PipelineConfig::default().with_data_path("/definitely/missing.csv");
        let err = ForecastPipeline::new(config).run("ten").unwrap_err();
        assert!(matches!(err, ForecastError::InvalidHorizon(_)));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let config = PipelineConfig::default().with_data_path("/definitely/missing.csv");
        let err = ForecastPipeline::new(config).run("3").unwrap_err();
        assert!(matches!(err, ForecastError::IoError(_)));
    }

    #[test]
    fn test_horizon_past_calendar_range_is_rejected_before_fit() {
        let pipeline = ForecastPipeline::new(PipelineConfig::default());
        // Too short to fit, so only the calendar check can produce this error
        let series = monthly_series(3);

        let err = pipeline
            .run_with_series(&series, Horizon::new(10_000_000))
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidHorizon(ref raw) if raw == "10000000"));
    }

    #[test]
    fn test_run_with_series_row_count() {
        let pipeline = ForecastPipeline::new(PipelineConfig::default());
        let series = monthly_series(48);

        for periods in [0, 1, 5] {
            let table = pipeline.run_with_series(&series, Horizon::new(periods)).unwrap();
            assert_eq!(table.len(), periods);
        }
    }
}
