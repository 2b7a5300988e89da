//! Spreadsheet date handling.
//!
//! Price exports encode dates as spreadsheet serial day numbers counted
//! from 1899-12-30 (the convention shared by Excel and LibreOffice, after
//! the 1900 leap-year quirk). Monthly files carry a `YYYY-MM` text column
//! instead.

use chrono::{Duration, NaiveDate};
use polars::prelude::*;

/// Day 0 of the spreadsheet serial calendar.
pub fn spreadsheet_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap()
}

/// Serial day number of 1970-01-01; bridges serials to the Date dtype,
/// which counts days from the Unix epoch.
pub const UNIX_EPOCH_SERIAL: i64 = 25_569;

// Anything outside this span is a typo or a stray numeric column, not a date.
const MAX_SERIAL_MAGNITUDE: f64 = 3_000_000.0;

/// Convert a spreadsheet serial day number to a calendar date.
///
/// Fractional day parts (intraday times) are truncated. Returns `None`
/// for non-finite or absurdly large values.
pub fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial.abs() > MAX_SERIAL_MAGNITUDE {
        return None;
    }
    spreadsheet_epoch().checked_add_signed(Duration::days(serial.floor() as i64))
}

/// Parse a `YYYY-MM` year-month string to the first day of that month.
pub fn parse_year_month(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok()
}

/// Days between the Unix epoch and `date` (the Date dtype's physical repr).
pub fn days_since_unix_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    date.signed_duration_since(epoch).num_days() as i32
}

/// Build a Date series from optional calendar dates.
pub fn date_series(name: &str, values: &[Option<NaiveDate>]) -> PolarsResult<Series> {
    let mut days: Int32Chunked = values
        .iter()
        .map(|opt| opt.map(days_since_unix_epoch))
        .collect();
    days.rename(name.into());
    days.into_series().cast(&DataType::Date)
}

/// Convert a column of spreadsheet serials to a Date series.
///
/// Values that cannot be read as numbers, or fall outside the plausible
/// serial range, become null rather than errors.
pub fn serial_column_to_dates(column: &Column, name: &str) -> PolarsResult<Series> {
    let numeric = column.as_materialized_series().cast(&DataType::Float64)?;
    let dates: Vec<Option<NaiveDate>> = numeric
        .f64()?
        .into_iter()
        .map(|opt| opt.and_then(from_serial))
        .collect();
    date_series(name, &dates)
}

/// Convert a column of `YYYY-MM` strings to a Date series (first of month).
pub fn month_column_to_dates(column: &Column, name: &str) -> PolarsResult<Series> {
    let text = column.as_materialized_series().cast(&DataType::String)?;
    let dates: Vec<Option<NaiveDate>> = text
        .str()?
        .into_iter()
        .map(|opt| opt.and_then(parse_year_month))
        .collect();
    date_series(name, &dates)
}
