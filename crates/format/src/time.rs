//! Timestamp conversions
//!
//! Date columns hold a Julian date `YYYYDDD`; time columns hold epoch
//! seconds with millisecond precision; load dates use `YY/MM/DD HH:MM:SS`,
//! which is exactly the 17 characters of an `lddate` column.

use chrono::{DateTime, TimeZone, Utc};

/// Parse an ISO-8601 / RFC 3339 instant
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Instant of an epoch time in seconds, to the millisecond
pub fn from_epoch_secs(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt((secs * 1000.0).round() as i64).single()
}

/// Julian date `YYYYDDD`
pub fn jdate(t: DateTime<Utc>) -> String {
    t.format("%Y%j").to_string()
}

/// Epoch seconds with three decimals
pub fn epoch(t: DateTime<Utc>) -> String {
    let millis = t.timestamp_millis();
    let sign = if millis < 0 { "-" } else { "" };
    let abs = millis.unsigned_abs();
    format!("{}{}.{:03}", sign, abs / 1000, abs % 1000)
}

/// Epoch seconds given as a number
pub fn epoch_secs(secs: f64) -> String {
    format!("{:.3}", secs)
}

/// Load date `YY/MM/DD HH:MM:SS`
pub fn lddate(t: DateTime<Utc>) -> String {
    t.format("%y/%m/%d %H:%M:%S").to_string()
}
