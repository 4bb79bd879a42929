//! Date range resolution for `after:` / `before:` / `during:` values.
//!
//! ## Supported Syntax
//!
//! - `YYYY-MM-DD` — a single UTC day
//! - `YYYY-MM` — a UTC calendar month
//! - `YYYY` — a UTC calendar year
//!
//! Values are resolved at parse time so malformed dates fail the whole
//! query before any record is evaluated.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::error::{Result, SearchError};

/// An inclusive-start, exclusive-end range of unix seconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First second inside the range.
    pub start: i64,
    /// First second past the range.
    pub end: i64,
}

impl DateRange {
    /// Resolves `YYYY`, `YYYY-MM`, or `YYYY-MM-DD` into a UTC range.
    ///
    /// `key` names the filter the value came from and only feeds the error
    /// message.
    pub fn resolve(key: &str, value: &str) -> Result<Self> {
        let invalid = || SearchError::InvalidDateFormat {
            key: key.to_string(),
            value: value.to_string(),
        };

        let parts = value.split('-').collect::<Vec<_>>();
        let (start_day, end_day) = match parts.as_slice() {
            [year_raw] => {
                let year = parse_digits(year_raw, 4).ok_or_else(invalid)? as i32;
                let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
                let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).ok_or_else(invalid)?;
                (start, end)
            }
            [year_raw, month_raw] => {
                let year = parse_digits(year_raw, 4).ok_or_else(invalid)? as i32;
                let month = parse_digits(month_raw, 2).ok_or_else(invalid)?;
                let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
                let end = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)
                }
                .ok_or_else(invalid)?;
                (start, end)
            }
            [year_raw, month_raw, day_raw] => {
                let year = parse_digits(year_raw, 4).ok_or_else(invalid)? as i32;
                let month = parse_digits(month_raw, 2).ok_or_else(invalid)?;
                let day = parse_digits(day_raw, 2).ok_or_else(invalid)?;
                let start = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
                let end = start.succ_opt().ok_or_else(invalid)?;
                (start, end)
            }
            _ => return Err(invalid()),
        };

        Ok(Self {
            start: day_start_utc(start_day),
            end: day_start_utc(end_day),
        })
    }

    /// `during:` containment: `start <= ts < end`.
    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.start && ts < self.end
    }
}

/// Parses a fixed-width all-digit field.
fn parse_digits(raw: &str, width: usize) -> Option<u32> {
    if raw.len() != width || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Unix timestamp of midnight UTC on the given day.
fn day_start_utc(date: NaiveDate) -> i64 {
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    Utc.from_utc_datetime(&midnight).timestamp()
}
