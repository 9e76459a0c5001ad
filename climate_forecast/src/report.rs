//! Output shapes for forecast renderers

use crate::error::Result;
use crate::table::ForecastTable;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;

/// Heading shown above the forecast table
pub const TABLE_TITLE: &str = "Forecasted Average Temperatures";
/// Heading shown above the forecast chart
pub const CHART_TITLE: &str = "Forecasted Average Temperature Trends";

const CHART_WIDTH: u32 = 600;
const CHART_HEIGHT: u32 = 400;

/// Vega-Lite description of the forecast line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChartSpec(Value);

impl ChartSpec {
    /// Line chart with months on x, forecasts on y and a tooltip per point
    pub fn from_table(table: &ForecastTable) -> Self {
        let points: Vec<Value> = table
            .rows()
            .iter()
            .map(|row| {
                json!({
                    "Date": row.date.to_string(),
                    "Forecasted Temperature": row.forecasted_temperature,
                })
            })
            .collect();

        Self(json!({
            "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
            "title": CHART_TITLE,
            "width": CHART_WIDTH,
            "height": CHART_HEIGHT,
            "data": { "values": points },
            "mark": "line",
            "encoding": {
                "x": {
                    "field": "Date",
                    "type": "temporal",
                    "timeUnit": "yearmonth",
                    "axis": { "title": "Month" }
                },
                "y": {
                    "field": "Forecasted Temperature",
                    "type": "quantitative",
                    "axis": { "title": "Average Temperature" }
                },
                "tooltip": [
                    { "field": "Date", "type": "temporal" },
                    { "field": "Forecasted Temperature", "type": "quantitative" }
                ]
            },
            "config": {
                "axis": {
                    "labelFontSize": 12,
                    "titleFontSize": 14,
                    "grid": false,
                    "domain": true,
                    "domainWidth": 0.8,
                    "domainColor": "grey"
                }
            }
        }))
    }

    /// Number of plotted points
    pub fn point_count(&self) -> usize {
        self.0["data"]["values"]
            .as_array()
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

/// Write the table as CSV with a header row
pub fn write_csv<W: Write>(table: &ForecastTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in table.rows() {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_table(values: &[f64]) -> ForecastTable {
        ForecastTable::align(NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(), values).unwrap()
    }

    #[test]
    fn test_chart_axes_and_points() {
        let chart = ChartSpec::from_table(&sample_table(&[30.0, 31.5]));
        let spec = chart.as_value();

        assert_eq!(chart.point_count(), 2);
        assert_eq!(spec["mark"], "line");
        assert_eq!(spec["encoding"]["x"]["axis"]["title"], "Month");
        assert_eq!(spec["encoding"]["y"]["axis"]["title"], "Average Temperature");
        assert_eq!(spec["data"]["values"][1]["Date"], "2024-02-01");
        assert_eq!(spec["data"]["values"][1]["Forecasted Temperature"], 31.5);
        assert_eq!(spec["encoding"]["tooltip"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_chart_for_empty_table() {
        let chart = ChartSpec::from_table(&ForecastTable::default());
        assert_eq!(chart.point_count(), 0);
        assert!(chart.to_json_pretty().unwrap().contains("\"values\": []"));
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        write_csv(&sample_table(&[30.0, 31.5]), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "index,Date,Forecasted Temperature\n1,2024-01-01,30.0\n2,2024-02-01,31.5\n"
        );
    }
}
