//! Month arithmetic for forecast dates

use chrono::{Datelike, Months, NaiveDate};

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month after the one containing `date`
pub fn next_month_start(date: NaiveDate) -> Option<NaiveDate> {
    month_start(date).checked_add_months(Months::new(1))
}

/// Start of the month `count` months after the month of `last`, if chrono
/// can represent it
pub fn months_after(last: NaiveDate, count: usize) -> Option<NaiveDate> {
    let months = u32::try_from(count).ok()?;
    month_start(last).checked_add_months(Months::new(months))
}

/// `count` consecutive month starts following the month of `last`.
///
/// The month of `last` itself is never included, even when `last` is already
/// the first of a month. Generation stops early only if chrono's date range
/// is exhausted.
pub fn future_month_starts(last: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let anchor = month_start(last);
    (1..=count)
        .map_while(|i| {
            let months = u32::try_from(i).ok()?;
            anchor.checked_add_months(Months::new(months))
        })
        .collect()
}
