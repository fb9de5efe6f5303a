use crate::date::error::DateError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt::Write;

pub mod error;

/// Unix timestamp of midnight UTC for the given calendar date.
pub fn make_timestamp(year: i32, month: u32, day: u32) -> Result<i64, DateError> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::OutOfRange)?;
    Ok(date.and_time(NaiveTime::default()).and_utc().timestamp())
}

/// Render a unix timestamp with a strftime pattern.
pub fn format_timestamp(timestamp: i64, format: &str) -> Result<String, DateError> {
    let date = DateTime::<Utc>::from_timestamp(timestamp, 0).ok_or(DateError::OutOfRange)?;
    let mut out = String::new();
    // chrono reports bad patterns through Display, not through format()
    write!(out, "{}", date.format(format)).map_err(|_| DateError::InvalidFormat)?;
    Ok(out)
}
