//! Utility functions for the climate_forecast crate

use chrono::{Days, NaiveDate};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// Convert a date to days since the Unix epoch, the physical layout of a
/// polars `Date` column
pub fn date_to_epoch_days(date: NaiveDate) -> i32 {
    use chrono::Datelike;
    date.num_days_from_ce() - UNIX_EPOCH_CE_DAYS
}

/// Inverse of [`date_to_epoch_days`]
pub fn epoch_days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_CE_DAYS)?)
}

/// Convert a timestamp in the given unit (nanoseconds per tick) to its
/// calendar date
pub fn epoch_ticks_to_date(ticks: i64, ticks_per_day: i64) -> Option<NaiveDate> {
    let days = ticks.div_euclid(ticks_per_day);
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    if days >= 0 {
        epoch.checked_add_days(Days::new(days as u64))
    } else {
        epoch.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Parsing of the date formats spreadsheets commonly export
pub mod date_parser {
    use crate::error::{ForecastError, Result};
    use chrono::{NaiveDate, NaiveDateTime};

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%m/%d/%Y %H:%M:%S",
    ];

    /// Parse a calendar date, dropping any time-of-day component
    pub fn parse_date(input: &str) -> Result<NaiveDate> {
        let trimmed = input.trim();

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(date);
            }
        }

        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(datetime.date());
            }
        }

        // Year-month, e.g. "2023-12"
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d") {
            return Ok(date);
        }

        Err(ForecastError::DataError(format!(
            "Unrecognised date: '{}'",
            input
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::date_parser::parse_date;
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_epoch_days_roundtrip_anchors() {
        assert_eq!(date_to_epoch_days(ymd(1970, 1, 1)), 0);
        assert_eq!(date_to_epoch_days(ymd(1970, 1, 2)), 1);
        assert_eq!(date_to_epoch_days(ymd(1969, 12, 31)), -1);
        assert_eq!(epoch_days_to_date(19_692), Some(ymd(2023, 12, 1)));
    }

    #[test]
    fn test_epoch_ticks_to_date() {
        let ms_per_day = 86_400_000;
        assert_eq!(epoch_ticks_to_date(0, ms_per_day), Some(ymd(1970, 1, 1)));
        assert_eq!(
            epoch_ticks_to_date(19_692 * ms_per_day + 3_600_000, ms_per_day),
            Some(ymd(2023, 12, 1))
        );
        assert_eq!(epoch_ticks_to_date(-1, ms_per_day), Some(ymd(1969, 12, 31)));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2023-01-15").unwrap(), ymd(2023, 1, 15));
        assert_eq!(parse_date("2023/01/15").unwrap(), ymd(2023, 1, 15));
        assert_eq!(parse_date("01/15/2023").unwrap(), ymd(2023, 1, 15));
        assert_eq!(parse_date("2023-01-15 14:30:45").unwrap(), ymd(2023, 1, 15));
        assert_eq!(parse_date("2023-01-15T00:00:00").unwrap(), ymd(2023, 1, 15));
        assert_eq!(parse_date(" 2023-12 ").unwrap(), ymd(2023, 12, 1));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("2023-13-01").is_err());
    }
}
