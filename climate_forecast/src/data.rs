//! Historical series loading and cleaning

use crate::config::ColumnNames;
use crate::error::{ForecastError, Result};
use crate::utils::{date_parser, date_to_epoch_days, epoch_days_to_date, epoch_ticks_to_date};
use chrono::NaiveDate;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// Cleaned monthly series: every row has a date and a finite value in
/// every column
#[derive(Debug, Clone)]
pub struct HistoricalSeries {
    /// Cleaned data frame, date column typed as `Date`, the rest `Float64`
    df: DataFrame,
    /// Column names the series was read with
    columns: ColumnNames,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

/// Data loader for historical series
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a historical series from a CSV spreadsheet
    pub fn from_csv<P: AsRef<Path>>(path: P, columns: &ColumnNames) -> Result<HistoricalSeries> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        info!(path = %path.display(), rows = df.height(), "read historical data");
        Self::from_dataframe(df, columns)
    }

    /// Clean an existing DataFrame into a historical series
    pub fn from_dataframe(df: DataFrame, columns: &ColumnNames) -> Result<HistoricalSeries> {
        for required in [&columns.date, &columns.value] {
            if df.column(required).is_err() {
                return Err(ForecastError::DataError(format!(
                    "Required column '{}' not found (columns: {:?})",
                    required,
                    df.get_column_names()
                )));
            }
        }

        let raw_rows = df.height();
        let coerced = df
            .get_columns()
            .iter()
            .map(|series| {
                if series.name() == columns.date {
                    coerce_dates(series)
                } else {
                    coerce_numeric(series)
                }
            })
            .collect::<Result<Vec<Series>>>()?;

        let cleaned = DataFrame::new(coerced)?.drop_nulls::<String>(None)?;
        let dropped = raw_rows - cleaned.height();
        if dropped > 0 {
            warn!(
                dropped,
                kept = cleaned.height(),
                "dropped rows with a missing value in at least one column"
            );
        }

        HistoricalSeries::from_cleaned(cleaned, columns.clone())
    }
}

/// Coerce a column to `Date`; anything unparseable becomes null
fn coerce_dates(series: &Series) -> Result<Series> {
    let days: Vec<Option<i32>> = match series.dtype() {
        DataType::Date => series.cast(&DataType::Int32)?.i32()?.into_iter().collect(),
        DataType::Datetime(unit, _) => {
            let ticks_per_day = match unit {
                TimeUnit::Nanoseconds => 86_400_000_000_000,
                TimeUnit::Microseconds => 86_400_000_000,
                TimeUnit::Milliseconds => 86_400_000,
            };
            series
                .cast(&DataType::Int64)?
                .i64()?
                .into_iter()
                .map(|ticks| {
                    ticks
                        .and_then(|t| epoch_ticks_to_date(t, ticks_per_day))
                        .map(date_to_epoch_days)
                })
                .collect()
        }
        DataType::Utf8 => series
            .utf8()?
            .into_iter()
            .map(|text| {
                text.and_then(|t| date_parser::parse_date(t).ok())
                    .map(date_to_epoch_days)
            })
            .collect(),
        other => {
            warn!(column = series.name(), dtype = %other, "date column has no date-like values");
            vec![None; series.len()]
        }
    };

    log_coerced(series, &days);
    Ok(Series::new(series.name(), days).cast(&DataType::Date)?)
}

/// Coerce a column to `Float64`; unparseable values and NaN become null
fn coerce_numeric(series: &Series) -> Result<Series> {
    let values: Vec<Option<f64>> = series
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();

    log_coerced(series, &values);
    Ok(Series::new(series.name(), values))
}

fn log_coerced<T>(original: &Series, coerced: &[Option<T>]) {
    let lost = coerced
        .iter()
        .filter(|v| v.is_none())
        .count()
        .saturating_sub(original.null_count());
    if lost > 0 {
        debug!(column = original.name(), lost, "values could not be coerced");
    }
}

impl HistoricalSeries {
    /// Build a series from parallel vectors of dates and values
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Dates length ({}) doesn't match values length ({})",
                dates.len(),
                values.len()
            )));
        }

        let columns = ColumnNames::default();
        let days: Vec<i32> = dates.iter().copied().map(date_to_epoch_days).collect();
        let date_series = Series::new(&columns.date, days).cast(&DataType::Date)?;
        let value_series = Series::new(&columns.value, values);
        let df = DataFrame::new(vec![date_series, value_series])?;

        DataLoader::from_dataframe(df, &columns)
    }

    fn from_cleaned(df: DataFrame, columns: ColumnNames) -> Result<Self> {
        let dates = df
            .column(&columns.date)?
            .cast(&DataType::Int32)?
            .i32()?
            .into_iter()
            .flatten()
            .map(|days| {
                epoch_days_to_date(days).ok_or_else(|| {
                    ForecastError::DataError(format!("Date out of range: {} days", days))
                })
            })
            .collect::<Result<Vec<NaiveDate>>>()?;

        let values: Vec<f64> = df
            .column(&columns.value)?
            .f64()?
            .into_iter()
            .flatten()
            .collect();

        debug!(rows = values.len(), "historical series ready");
        Ok(Self {
            df,
            columns,
            dates,
            values,
        })
    }

    /// Get the cleaned DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Column names the series was read with
    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    /// Observation dates, in file order
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observed values of the forecast column, in file order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Latest observation date
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.iter().max().copied()
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_keeps_order() {
        let dates = vec![ymd(2023, 1, 1), ymd(2023, 2, 1), ymd(2023, 3, 1)];
        let series = HistoricalSeries::new(dates.clone(), vec![30.1, 32.4, 40.0]).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.dates(), dates.as_slice());
        assert_eq!(series.values(), &[30.1, 32.4, 40.0]);
        assert_eq!(series.last_date(), Some(ymd(2023, 3, 1)));
    }

    #[test]
    fn test_new_drops_nan() {
        let dates = vec![ymd(2023, 1, 1), ymd(2023, 2, 1), ymd(2023, 3, 1)];
        let series = HistoricalSeries::new(dates, vec![30.1, f64::NAN, 40.0]).unwrap();

        assert_eq!(series.values(), &[30.1, 40.0]);
        assert_eq!(series.dates(), &[ymd(2023, 1, 1), ymd(2023, 3, 1)]);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = HistoricalSeries::new(vec![ymd(2023, 1, 1)], vec![1.0, 2.0]);
        assert!(matches!(result, Err(ForecastError::DataError(_))));
    }

    #[test]
    fn test_last_date_is_maximum_not_last_row() {
        let dates = vec![ymd(2023, 5, 1), ymd(2023, 7, 1), ymd(2023, 6, 1)];
        let series = HistoricalSeries::new(dates, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.last_date(), Some(ymd(2023, 7, 1)));
    }

    #[test]
    fn test_from_dataframe_coerces_text_columns() {
        let df = DataFrame::new(vec![
            Series::new("Date", &["2023-01-01", "2023-02-01", "bad", "2023-04-01"]),
            Series::new("Temp_Avg", &["30.5", "n/a", "41.0", "48.2"]),
            Series::new("Precip", &[Some(1.0), Some(2.0), Some(3.0), None]),
        ])
        .unwrap();

        let series = DataLoader::from_dataframe(df, &ColumnNames::default()).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.dates(), &[ymd(2023, 1, 1)]);
        assert_eq!(series.values(), &[30.5]);
        assert_eq!(series.dataframe().width(), 3);
    }

    #[test]
    fn test_from_dataframe_requires_columns() {
        let df = DataFrame::new(vec![Series::new("Date", &["2023-01-01"])]).unwrap();
        let result = DataLoader::from_dataframe(df, &ColumnNames::default());
        assert!(matches!(result, Err(ForecastError::DataError(_))));
    }
}
