use std::fmt::Display;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, SecondsFormat, TimeZone, Utc};

pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn local_now() -> DateTime<Local> {
    Local::now()
}

/// Calendar day of a scan, `YYYY-MM-DD`.
pub fn format_scan_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%Y-%m-%d").to_string()
}

/// Full-precision scan instant, RFC 3339 with milliseconds and offset.
pub fn format_scan_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Turns a stored `scan_time` into the `YYYY-MM-DD HH:MM:SS` form shown at
/// the station. Values the store mangled are passed through untouched.
pub fn format_display_time(scan_time: &str) -> String {
    match DateTime::parse_from_rfc3339(scan_time) {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => scan_time.to_string(),
    }
}

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|err| anyhow!(err))
}
