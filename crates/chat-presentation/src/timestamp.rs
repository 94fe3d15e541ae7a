//! Timestamp formatting

use std::fmt;

use chrono::{DateTime, TimeZone};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Short age of `then` as seen at `now`: `now`, `5m`, `3h`, `2d`, or the
/// calendar date (`1/15/2024`) once a week has passed.
///
/// Timestamps in the future read as `now`.
pub fn relative_time<Tz>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let elapsed = now.timestamp_millis() - then.timestamp_millis();

    if elapsed < MINUTE_MS {
        "now".to_string()
    } else if elapsed < HOUR_MS {
        format!("{}m", elapsed / MINUTE_MS)
    } else if elapsed < DAY_MS {
        format!("{}h", elapsed / HOUR_MS)
    } else if elapsed < 7 * DAY_MS {
        format!("{}d", elapsed / DAY_MS)
    } else {
        then.format("%-m/%-d/%Y").to_string()
    }
}

/// Twelve-hour clock time, e.g. `9:30 AM`
pub fn clock_time<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format("%-I:%M %p").to_string()
}
