//! Interval normalization.
//!
//! Converts an item's `HH:MM` start/end pair into a minute-of-day interval.
//! Spans that cross midnight are truncated at the end of the day; the
//! remainder is not carried into the next day's column.

use crate::utils::time::{parse_clock, TimeParseError, LAST_MINUTE, MINUTES_PER_DAY};

/// Duration used when malformed input produces a negative span.
pub const FALLBACK_DURATION: i32 = 60;

/// A time block within one day, in minutes since local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteInterval {
    pub start: i32,
    pub end: i32,
    pub duration: i32,
}

impl MinuteInterval {
    /// Normalize a pair of `HH:MM` strings.
    ///
    /// # Errors
    /// Returns the parse error of the first unreadable time; callers treat
    /// such items as untimed.
    pub fn from_clock(start: &str, end: &str) -> Result<Self, TimeParseError> {
        let start = parse_clock(start)?;
        let end = parse_clock(end)?;
        Ok(Self::from_minutes(start, end))
    }

    /// Normalize raw minute offsets.
    ///
    /// An end before the start means the item runs past midnight; the end is
    /// moved to 24:00 (1440).
    pub fn from_minutes(start: i32, end: i32) -> Self {
        let start = clamp_to_day(start, "start");
        let end = clamp_to_day(end, "end");
        let end = if end < start { MINUTES_PER_DAY } else { end };

        Self {
            start,
            end,
            duration: clamp_duration(end - start),
        }
    }

    /// Strict intersection: intervals that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &MinuteInterval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Clamp a raw duration into `0..=1439`, substituting a one hour default for
/// negative values.
pub fn clamp_duration(raw: i32) -> i32 {
    if raw < 0 {
        log::warn!(
            "Negative duration of {} minutes, defaulting to {} minutes",
            raw,
            FALLBACK_DURATION
        );
        FALLBACK_DURATION
    } else if raw > LAST_MINUTE {
        log::warn!(
            "Duration of {} minutes exceeds a day, clamping to {} minutes",
            raw,
            LAST_MINUTE
        );
        LAST_MINUTE
    } else {
        raw
    }
}

fn clamp_to_day(minutes: i32, label: &str) -> i32 {
    if (0..=MINUTES_PER_DAY).contains(&minutes) {
        return minutes;
    }
    let clamped = minutes.clamp(0, MINUTES_PER_DAY);
    log::warn!(
        "Interval {} of {} minutes is outside the day, clamping to {}",
        label,
        minutes,
        clamped
    );
    clamped
}
