//! Wall clock helpers used for display.
//!
//! Relay messages carry no timestamps; these are only for rendering the
//! moment a frame was received.

use std::fmt::Display;

use chrono::{Local, TimeZone, Utc};

/// Current Unix timestamp in milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as `HH:MM:SS` in the local timezone.
pub fn format_local_clock(timestamp_millis: i64) -> String {
    format_clock(&Local, timestamp_millis)
}

fn format_clock<Tz>(tz: &Tz, timestamp_millis: i64) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}
