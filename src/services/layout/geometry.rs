//! Geometry mapping.
//!
//! Turns minute offsets and column slots into pixel positions for a view.
//! Vertical values are in pixels from the top of the day column; horizontal
//! values are fractions of the column width so the views can place boxes in
//! whatever rect egui hands them.

use super::columns::ColumnSlot;
use super::TimedLayoutEntry;
use crate::utils::time::MINUTES_PER_DAY;

/// Calendar density multiplier, always within `[Zoom::MIN, Zoom::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Zoom(f32);

impl Zoom {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 1.5;
    pub const STEP: f32 = 0.1;

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self::new(round_to_step(self.0 + Self::STEP))
    }

    pub fn zoom_out(self) -> Self {
        Self::new(round_to_step(self.0 - Self::STEP))
    }

    /// Apply a multiplicative factor (e.g. from ctrl+scroll).
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.0 * factor)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

fn round_to_step(value: f32) -> f32 {
    (value / Zoom::STEP).round() * Zoom::STEP
}

/// Per-view pixel constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMetrics {
    /// Pixels per minute at zoom 1.0
    pub px_per_minute: f32,
    /// Smallest box height, so short items stay clickable
    pub min_height: f32,
    /// Where the foreground band starts, as a fraction of the column width
    pub foreground_band_start: f32,
}

impl ViewMetrics {
    /// Today view: 90px per hour.
    pub const DAY: ViewMetrics = ViewMetrics {
        px_per_minute: 1.5,
        min_height: 28.0,
        foreground_band_start: 0.4,
    };

    /// Week view: 48px per hour.
    pub const WEEK: ViewMetrics = ViewMetrics {
        px_per_minute: 0.8,
        min_height: 20.0,
        foreground_band_start: 0.3,
    };

    /// Effective pixels per minute at `zoom`.
    pub fn scale(&self, zoom: Zoom) -> f32 {
        self.px_per_minute * zoom.value()
    }

    /// Height of a full day column.
    pub fn content_height(&self, zoom: Zoom) -> f32 {
        MINUTES_PER_DAY as f32 * self.scale(zoom)
    }

    /// Pixel offset of a minute of the day.
    pub fn offset_of(&self, minutes: i32, zoom: Zoom) -> f32 {
        minutes as f32 * self.scale(zoom)
    }

    /// Inverse of [`ViewMetrics::offset_of`]; not snapped or clamped.
    pub fn minutes_at_offset(&self, y: f32, zoom: Zoom) -> f32 {
        y / self.scale(zoom)
    }
}

/// Box placement for one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryGeometry {
    pub top: f32,
    pub height: f32,
    /// Left edge as a fraction of the column width
    pub left: f32,
    /// Width as a fraction of the column width
    pub width: f32,
}

impl EntryGeometry {
    /// Resolve the horizontal fractions against a concrete column.
    pub fn x_range(&self, column_left: f32, column_width: f32) -> (f32, f32) {
        let left = column_left + self.left * column_width;
        (left, left + self.width * column_width)
    }
}

/// `(top, height)` in pixels for a block starting at `start_minutes`.
pub fn vertical_extent(
    start_minutes: i32,
    duration_minutes: i32,
    metrics: &ViewMetrics,
    zoom: Zoom,
) -> (f32, f32) {
    let top = metrics.offset_of(start_minutes, zoom);
    let height = (duration_minutes as f32 * metrics.scale(zoom)).max(metrics.min_height);
    (top, height)
}

/// `(left, width)` fractions for a column slot.
pub fn horizontal_extent(slot: &ColumnSlot, metrics: &ViewMetrics) -> (f32, f32) {
    if slot.is_background || !slot.in_overlap_group {
        return (0.0, 1.0);
    }

    let band_start = metrics.foreground_band_start;
    let columns = slot.total_columns.max(1) as f32;
    let width = (1.0 - band_start) / columns;
    (band_start + slot.column as f32 * width, width)
}

pub fn entry_geometry(entry: &TimedLayoutEntry<'_>, metrics: &ViewMetrics, zoom: Zoom) -> EntryGeometry {
    let (top, height) = vertical_extent(entry.start_minutes, entry.duration_minutes, metrics, zoom);
    let (left, width) = horizontal_extent(&entry.slot(), metrics);
    EntryGeometry {
        top,
        height,
        left,
        width,
    }
}

/// Scroll offset that keeps the content under the cursor fixed across a zoom change.
///
/// `cursor_y` is measured from the top of the visible viewport.
pub fn anchored_scroll_offset(scroll_offset: f32, cursor_y: f32, old_zoom: Zoom, new_zoom: Zoom) -> f32 {
    let content_y = scroll_offset + cursor_y;
    let rescaled = content_y * new_zoom.value() / old_zoom.value();
    (rescaled - cursor_y).max(0.0)
}
