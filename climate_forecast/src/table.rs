//! Forecast values paired with their dates

use crate::calendar::future_month_starts;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a forecast table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    /// Display position, starting at 1
    pub index: usize,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Forecasted Temperature")]
    pub forecasted_temperature: f64,
}

/// Forecast values aligned with future month starts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastTable {
    rows: Vec<ForecastRow>,
}

impl ForecastTable {
    /// Pair `values` positionally with the month starts following `last_date`
    pub fn align(last_date: NaiveDate, values: &[f64]) -> Result<Self> {
        let dates = future_month_starts(last_date, values.len());
        if dates.len() != values.len() {
            return Err(ForecastError::ValidationError(format!(
                "Generated {} dates for {} forecast values",
                dates.len(),
                values.len()
            )));
        }

        let rows = dates
            .into_iter()
            .zip(values.iter().copied())
            .enumerate()
            .map(|(i, (date, forecasted_temperature))| ForecastRow {
                index: i + 1,
                date,
                forecasted_temperature,
            })
            .collect();

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.forecasted_temperature).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for ForecastTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rows.len().to_string().len().max(1);
        writeln!(f, "{:>width$} | {:<10} | Forecasted Temperature", "", "Date")?;
        writeln!(f, "{:->width$}-+-{:-<10}-+-{:-<22}", "", "", "")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>width$} | {} | {:.6}",
                row.index, row.date, row.forecasted_temperature
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_align_numbers_from_one() {
        let table = ForecastTable::align(ymd(2023, 12, 1), &[30.5, 31.0, 38.25]).unwrap();

        let indices: Vec<usize> = table.rows().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(
            table.dates(),
            vec![ymd(2024, 1, 1), ymd(2024, 2, 1), ymd(2024, 3, 1)]
        );
        assert_eq!(table.values(), vec![30.5, 31.0, 38.25]);
    }

    #[test]
    fn test_align_empty() {
        let table = ForecastTable::align(ymd(2023, 12, 1), &[]).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_display() {
        let table = ForecastTable::align(ymd(2023, 12, 1), &[30.5, 31.0]).unwrap();
        let expected = "\
  | Date       | Forecasted Temperature
--+------------+-----------------------
1 | 2024-01-01 | 30.500000
2 | 2024-02-01 | 31.000000
";
        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn test_serialized_field_names() {
        let table = ForecastTable::align(ymd(2023, 12, 1), &[30.5]).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rows": [{"index": 1, "Date": "2024-01-01", "Forecasted Temperature": 30.5}]
            })
        );
    }
}
