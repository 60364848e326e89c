//! Conversion between "HH:MM" strings and minutes since midnight.
//!
//! The lenient functions never fail: malformed input resolves to `0` /
//! `"00:00"` with a logged warning, because trip generation runs them inside
//! loops that must not abort half way. New call sites that want to reject bad
//! input should use [`parse_time_strict`].

use chrono::{NaiveTime, Timelike};
use thiserror::Error;
use tracing::warn;

use crate::defaults::MINUTES_PER_DAY;

/// Why a time string could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("time string is empty")]
    Empty,
    #[error("time '{0}' is not in HH:MM format")]
    Malformed(String),
    #[error("time '{0}' has hours or minutes out of range")]
    OutOfRange(String),
}

/// Parse "HH:MM" into minutes since midnight, rejecting anything else.
pub fn parse_time_strict(time: &str) -> Result<i32, TimeParseError> {
    let trimmed = time.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    let (hours, minutes) = trimmed
        .split_once(':')
        .ok_or_else(|| TimeParseError::Malformed(time.to_string()))?;

    let hours: u32 = hours
        .trim()
        .parse()
        .map_err(|_| TimeParseError::Malformed(time.to_string()))?;
    let minutes: u32 = minutes
        .trim()
        .parse()
        .map_err(|_| TimeParseError::Malformed(time.to_string()))?;

    // from_hms_opt enforces 0-23 / 0-59
    let parsed = NaiveTime::from_hms_opt(hours, minutes, 0)
        .ok_or_else(|| TimeParseError::OutOfRange(time.to_string()))?;

    Ok((parsed.num_seconds_from_midnight() / 60) as i32)
}

/// Parse "HH:MM" into minutes since midnight, defaulting to `0` on bad input.
pub fn time_to_minutes(time: &str) -> i32 {
    match parse_time_strict(time) {
        Ok(minutes) => minutes.clamp(0, MINUTES_PER_DAY),
        Err(TimeParseError::Empty) => {
            warn!("Missing time string, defaulting to 00:00");
            0
        }
        Err(e) => {
            warn!("Invalid time format: {}, defaulting to 00:00", e);
            0
        }
    }
}

/// Format minutes since midnight as "HH:MM".
///
/// Input is clamped to `[0, 1440]` and hours wrap at 24, so 1440 renders as
/// "00:00".
pub fn minutes_to_time(minutes: i64) -> String {
    let clamped = minutes.clamp(0, MINUTES_PER_DAY as i64);
    let hours = (clamped / 60) % 24;
    let mins = clamped % 60;
    format!("{:02}:{:02}", hours, mins)
}

/// Floating point variant of [`minutes_to_time`]. Non-finite input renders as
/// "00:00"; fractional minutes are truncated.
pub fn minutes_to_time_f64(minutes: f64) -> String {
    if !minutes.is_finite() {
        warn!("Non-numeric minutes value {}, defaulting to 00:00", minutes);
        return "00:00".to_string();
    }
    minutes_to_time(minutes.trunc() as i64)
}

/// Format a service time without wrapping at midnight.
///
/// Trips that run past midnight keep counting hours ("24:15", "25:05") so
/// that times within one trip stay monotonic.
pub fn format_service_time(minutes: i32) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Add `delta` minutes to an "HH:MM" time.
///
/// A negative delta is refused: the original time is returned unchanged.
pub fn add_minutes_to_time(time: &str, delta: i64) -> String {
    if delta < 0 {
        warn!("Refusing to add negative minutes ({}) to {}", delta, time);
        return time.to_string();
    }
    minutes_to_time(time_to_minutes(time) as i64 + delta)
}
