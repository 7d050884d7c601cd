//! Common utility functions for calendar views.
//!
//! This module contains pure helper functions used across different view types.

use chrono::NaiveDate;
use egui::Color32;

use super::palette::TimeGridPalette;
use crate::services::layout::LayoutSource;
use crate::utils::date::week_days;
use crate::utils::time::format_clock;

/// Parse a hex color string to Color32.
///
/// # Arguments
/// * `hex` - `#RRGGBB` or `#RGB`, the leading '#' optional
///
/// # Returns
/// * `Some(Color32)` if parsing succeeds
/// * `None` if the input is empty or invalid
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color32::from_rgb(r, g, b))
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Color32::from_rgb(channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

/// Block fill: the source's own color, else the palette default for its kind.
pub(crate) fn block_fill(source: &LayoutSource<'_>, palette: &TimeGridPalette) -> Color32 {
    source.color().and_then(parse_color).unwrap_or(if source.is_task() {
        palette.task_fill
    } else {
        palette.content_fill
    })
}

/// `HH:MM–HH:MM` label for a block.
pub fn format_range(start_minutes: i32, end_minutes: i32) -> String {
    format!("{}–{}", format_clock(start_minutes), format_clock(end_minutes))
}

/// Short weekday names in display order for the given first day of week.
pub fn weekday_labels(first_day_of_week: u8) -> Vec<String> {
    // Any fixed date works; only the weekday sequence matters
    let reference = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap_or_default();
    week_days(reference, first_day_of_week)
        .into_iter()
        .map(|date| date.format("%a").to_string())
        .collect()
}
