// Resize and move drags on existing items
//
// Pixel deltas are converted to minutes with the view scale, snapped to the
// resize grid and committed on every change.

use chrono::NaiveDate;

use super::{DragConfig, TimeRange};
use crate::models::planner_item::PlannerItem;
use crate::services::layout::geometry::Zoom;
use crate::utils::time::{snap_round, LAST_MINUTE};

/// Which edge of the item is being dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeEdge {
    /// Top edge - adjusts start time
    Top,
    /// Bottom edge - adjusts end time
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct ResizeDrag {
    pub original: PlannerItem,
    pub date: NaiveDate,
    pub edge: ResizeEdge,
    pub range: TimeRange,
    pub press_y: f32,
    pub zoom: Zoom,
    /// Boundary value last committed
    pub current: i32,
}

impl ResizeDrag {
    pub fn new(
        original: PlannerItem,
        date: NaiveDate,
        edge: ResizeEdge,
        range: TimeRange,
        press_y: f32,
        zoom: Zoom,
    ) -> Self {
        let current = match edge {
            ResizeEdge::Top => range.start_minutes,
            ResizeEdge::Bottom => range.end_minutes,
        };
        Self {
            original,
            date,
            edge,
            range,
            press_y,
            zoom,
            current,
        }
    }

    /// New boundary for pointer position `y`, if it changed and keeps the
    /// minimum duration from the fixed edge.
    pub fn update(&mut self, y: f32, config: &DragConfig) -> Option<i32> {
        let delta = snapped_delta(y - self.press_y, self.zoom, config);
        let candidate = match self.edge {
            ResizeEdge::Top => {
                let start = self.range.start_minutes + delta;
                let fits = start >= 0 && self.range.end_minutes - start >= config.resize_min_duration;
                fits.then_some(start)
            }
            ResizeEdge::Bottom => {
                let end = self.range.end_minutes + delta;
                let fits = end <= LAST_MINUTE && end - self.range.start_minutes >= config.resize_min_duration;
                fits.then_some(end)
            }
        }?;

        if candidate == self.current {
            return None;
        }
        self.current = candidate;
        Some(candidate)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct MoveDrag {
    pub original: PlannerItem,
    pub range: TimeRange,
    pub press_y: f32,
    pub zoom: Zoom,
    pub current_date: NaiveDate,
    pub current_start: i32,
}

impl MoveDrag {
    pub fn new(original: PlannerItem, date: NaiveDate, range: TimeRange, press_y: f32, zoom: Zoom) -> Self {
        // An item truncated at midnight only fits the day one minute earlier;
        // starting from that position keeps a zero delta from committing.
        let current_start = day_start(range.start_minutes, range.duration());
        Self {
            original,
            range,
            press_y,
            zoom,
            current_date: date,
            current_start,
        }
    }

    /// Shift the item so it keeps its duration and stays inside the day.
    pub fn update(&mut self, date: NaiveDate, y: f32, config: &DragConfig) -> Option<TimeRange> {
        let duration = self.range.duration().min(LAST_MINUTE);
        let delta = snapped_delta(y - self.press_y, self.zoom, config);
        let start = day_start(self.range.start_minutes + delta, duration);

        if start == self.current_start && date == self.current_date {
            return None;
        }
        self.current_start = start;
        self.current_date = date;
        Some(TimeRange::new(start, start + duration))
    }
}

/// Latest start that keeps `duration` inside 00:00-23:59.
fn day_start(start: i32, duration: i32) -> i32 {
    start.clamp(0, LAST_MINUTE - duration.min(LAST_MINUTE))
}

fn snapped_delta(delta_px: f32, zoom: Zoom, config: &DragConfig) -> i32 {
    let delta_minutes = config.metrics.minutes_at_offset(delta_px, zoom);
    snap_round(delta_minutes, config.resize_snap_minutes)
}
