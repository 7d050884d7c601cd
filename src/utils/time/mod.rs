// Clock-time utilities
// Minute-of-day arithmetic for "HH:MM" strings used by planner items

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;
/// Last representable minute of the day (23:59).
pub const LAST_MINUTE: i32 = MINUTES_PER_DAY - 1;

/// Errors raised while reading an `HH:MM` clock string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("time string is empty")]
    Empty,
    #[error("'{0}' is not a valid HH:MM time")]
    Malformed(String),
}

/// Parse an `HH:MM` (24-hour) string into minutes since midnight.
///
/// A trailing seconds component (`HH:MM:SS`) is accepted and ignored.
pub fn parse_clock(value: &str) -> Result<i32, TimeParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| TimeParseError::Malformed(trimmed.to_string()))?;

    Ok((time.hour() * 60 + time.minute()) as i32)
}

/// Format minutes since midnight as `HH:MM`, clamped to 00:00..=23:59.
pub fn format_clock(minutes: i32) -> String {
    let minutes = minutes.clamp(0, LAST_MINUTE);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Round `minutes` down to the previous multiple of `grid`.
pub fn snap_floor(minutes: i32, grid: i32) -> i32 {
    if grid <= 1 {
        return minutes;
    }
    minutes.div_euclid(grid) * grid
}

/// Round `minutes` to the nearest multiple of `grid` (halves round away from zero).
pub fn snap_round(minutes: f32, grid: i32) -> i32 {
    if grid <= 1 {
        return minutes.round() as i32;
    }
    let grid = grid as f32;
    ((minutes / grid).round() * grid) as i32
}
