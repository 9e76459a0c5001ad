use chrono::NaiveDate;
use climate_forecast::config::ColumnNames;
use climate_forecast::data::{DataLoader, HistoricalSeries};
use climate_forecast::error::{ErrorKind, ForecastError};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_data_loader_from_csv() {
    let file = csv_file(&[
        "Date,Temp_Avg,Temp_Max",
        "2023-10-01,55.2,63.0",
        "2023-11-01,44.9,52.1",
        "2023-12-01,37.3,44.0",
    ]);

    let series = DataLoader::from_csv(file.path(), &ColumnNames::default()).unwrap();

    assert_eq!(series.len(), 3);
    assert!(!series.is_empty());
    assert_eq!(series.values(), &[55.2, 44.9, 37.3]);
    assert_eq!(
        series.dates(),
        &[ymd(2023, 10, 1), ymd(2023, 11, 1), ymd(2023, 12, 1)]
    );
    assert_eq!(series.last_date(), Some(ymd(2023, 12, 1)));
}

#[test]
fn test_rows_with_any_missing_value_are_dropped() {
    let file = csv_file(&[
        "Date,Temp_Avg,Precip",
        "2023-01-01,29.0,3.2",
        ",31.0,2.9",
        "2023-03-01,,4.1",
        "2023-04-01,48.5,",
        "2023-05-01,n/a,3.3",
        "sometime,60.0,3.0",
        "2023-07-01,74.1,3.4",
    ]);

    let series = DataLoader::from_csv(file.path(), &ColumnNames::default()).unwrap();

    assert_eq!(series.dates(), &[ymd(2023, 1, 1), ymd(2023, 7, 1)]);
    assert_eq!(series.values(), &[29.0, 74.1]);
    assert_eq!(series.dataframe().height(), 2);
}

#[test]
fn test_datetime_text_is_reduced_to_dates() {
    let file = csv_file(&[
        "Date,Temp_Avg",
        "2023-11-01 00:00:00,44.9",
        "2023-12-01 00:00:00,37.3",
    ]);

    let series = DataLoader::from_csv(file.path(), &ColumnNames::default()).unwrap();
    assert_eq!(series.last_date(), Some(ymd(2023, 12, 1)));
}

#[test]
fn test_custom_column_names() {
    let file = csv_file(&["month,avg_temp", "2023-11-01,44.9", "2023-12-01,37.3"]);
    let columns = ColumnNames {
        date: "month".to_string(),
        value: "avg_temp".to_string(),
    };

    let series = DataLoader::from_csv(file.path(), &columns).unwrap();
    assert_eq!(series.values(), &[44.9, 37.3]);
    assert_eq!(series.columns(), &columns);
}

#[test]
fn test_data_loader_error_handling() {
    // Non-existent file
    let err = DataLoader::from_csv("nonexistent_file.csv", &ColumnNames::default()).unwrap_err();
    assert!(matches!(err, ForecastError::IoError(_)));
    assert_eq!(err.kind(), ErrorKind::DataLoad);

    // Required columns missing
    let file = csv_file(&["invalid,csv,format", "1,2,3"]);
    let err = DataLoader::from_csv(file.path(), &ColumnNames::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataLoad);
}

#[test]
fn test_in_memory_series() {
    let dates = vec![ymd(2023, 1, 1), ymd(2023, 2, 1)];
    let series = HistoricalSeries::new(dates, vec![30.0, f64::INFINITY]).unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series.last_date(), Some(ymd(2023, 1, 1)));
}
