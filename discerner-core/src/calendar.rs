//! Calendar conversion between wiki-style dates and series offsets.
//!
//! Page-view sources report days as `YYYYMMDD` (optionally with a trailing
//! `HH` hour), older dumps as `YYYY-MM-DD`. Price series are calendar-daily,
//! so an event's offset is simply its distance in days from the series start.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("unrecognised wiki date '{0}'")]
    BadDate(String),

    #[error("hour {0} is out of range")]
    BadHour(u32),
}

/// Parse `YYYYMMDD`, `YYYYMMDDHH` or `YYYY-MM-DD`.
pub fn parse_wiki_date(raw: &str) -> Result<NaiveDate, CalendarError> {
    let raw = raw.trim();
    let parsed = if raw.contains('-') {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    } else if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalendarError::BadDate(raw.to_string()));
    } else {
        match raw.len() {
            8 => NaiveDate::parse_from_str(raw, "%Y%m%d"),
            10 => NaiveDate::parse_from_str(&raw[..8], "%Y%m%d"),
            _ => return Err(CalendarError::BadDate(raw.to_string())),
        }
    };
    parsed.map_err(|_| CalendarError::BadDate(raw.to_string()))
}

/// 0-based day of the year.
pub fn day_of_year_offset(date: NaiveDate) -> usize {
    date.ordinal0() as usize
}

/// Days from `origin` to `date`, or `None` when `date` precedes `origin`.
pub fn day_offset(origin: NaiveDate, date: NaiveDate) -> Option<usize> {
    let days = (date - origin).num_days();
    usize::try_from(days).ok()
}

/// Unix timestamp of `date` at `hour`:00 UTC.
pub fn timestamp_at(date: NaiveDate, hour: u32) -> Result<i64, CalendarError> {
    date.and_hms_opt(hour, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .ok_or(CalendarError::BadHour(hour))
}
