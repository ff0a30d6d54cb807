//! Time dimension expansion: calendar fields derived from a play timestamp.

use chrono::{DateTime, Datelike, SecondsFormat, TimeZone, Timelike, Utc};

/// One row of the `time` dimension. Every field is a pure function of
/// `start_time`; deriving the same timestamp twice yields identical rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRow {
    pub start_time: DateTime<Utc>,
    /// 0..=23
    pub hour: u32,
    /// Day of month, 1..=31
    pub day: u32,
    /// ISO week of year, 1..=53
    pub week: u32,
    /// 1..=12
    pub month: u32,
    pub year: i32,
    /// 0 = Monday .. 6 = Sunday
    pub weekday: u32,
}

/// Convert a raw epoch-millisecond value into a UTC timestamp.
/// `None` for values outside chrono's representable range.
pub fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Canonical text encoding of a start time, shared by the `time` and
/// `songplays` inserts so the two tables always agree byte-for-byte.
pub fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl TimeRow {
    pub fn derive(ts: DateTime<Utc>) -> Self {
        Self {
            start_time: ts,
            hour: ts.hour(),
            day: ts.day(),
            week: ts.iso_week().week(),
            month: ts.month(),
            year: ts.year(),
            weekday: ts.weekday().num_days_from_monday(),
        }
    }

    /// Expand a batch of timestamps, preserving input order.
    pub fn expand(timestamps: &[DateTime<Utc>]) -> Vec<TimeRow> {
        timestamps.iter().map(|ts| TimeRow::derive(*ts)).collect()
    }
}
