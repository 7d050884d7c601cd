// Drag-to-create
// Tracks the anchor slots while the pointer sweeps across empty time slots

use chrono::NaiveDate;

use super::{DragConfig, SlotTime, TimeRange};
use crate::services::layout::geometry::Zoom;
use crate::utils::time::LAST_MINUTE;

#[derive(Clone, Debug, PartialEq)]
pub(super) struct CreateDrag {
    pub date: NaiveDate,
    pub anchor: SlotTime,
    pub current: SlotTime,
    pub press_y: f32,
    pub zoom: Zoom,
    /// Pointer offset of the latest sample
    pub last_y: f32,
}

impl CreateDrag {
    pub fn begin(date: NaiveDate, y: f32, zoom: Zoom, config: &DragConfig) -> Self {
        let anchor = SlotTime::at_offset(y, zoom, config);
        Self {
            date,
            anchor,
            current: anchor,
            press_y: y,
            zoom,
            last_y: y,
        }
    }

    /// Move the end anchor; returns true when the slot under the pointer changed.
    pub fn update(&mut self, y: f32, config: &DragConfig) -> bool {
        self.last_y = y;
        let slot = SlotTime::at_offset(y, self.zoom, config);
        if slot == self.current {
            return false;
        }
        self.current = slot;
        true
    }

    /// Whether the pointer ends away from where it was pressed.
    pub fn has_moved(&self) -> bool {
        self.last_y != self.press_y
    }

    /// Normalized range between the anchors, before the minimum span is enforced.
    pub fn raw_range(&self) -> TimeRange {
        let a = self.anchor.minutes();
        let b = self.current.minutes();
        TimeRange::new(a.min(b), a.max(b))
    }

    /// Final range: start before end, at least `create_min_span` long, inside the day.
    pub fn finish(&self, config: &DragConfig) -> TimeRange {
        let raw = self.raw_range();
        let mut start = raw.start_minutes;
        let mut end = raw.end_minutes;

        if end - start < config.create_min_span {
            end = start + config.create_min_span;
        }
        if end > LAST_MINUTE {
            end = LAST_MINUTE;
            start = start.min(end - config.create_min_span).max(0);
        }

        TimeRange::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn y_for(minutes: i32, config: &DragConfig) -> f32 {
        config.metrics.offset_of(minutes, Zoom::default())
    }

    #[test]
    fn test_anchor_snaps_down_to_grid() {
        let config = DragConfig::DAY;
        let drag = CreateDrag::begin(date(), y_for(9 * 60 + 17, &config), Zoom::default(), &config);
        assert_eq!(drag.anchor, SlotTime { hour: 9, minute: 10 });
    }

    #[test]
    fn test_week_grid_is_thirty_minutes() {
        let config = DragConfig::WEEK;
        let drag = CreateDrag::begin(date(), y_for(9 * 60 + 45, &config), Zoom::default(), &config);
        assert_eq!(drag.anchor, SlotTime { hour: 9, minute: 30 });
    }

    #[test]
    fn test_upward_drag_is_normalized() {
        let config = DragConfig::DAY;
        let mut drag = CreateDrag::begin(date(), y_for(600, &config), Zoom::default(), &config);
        drag.update(y_for(540, &config), &config);
        assert_eq!(drag.finish(&config), TimeRange::new(540, 600));
    }

    #[test]
    fn test_minimum_span_extends_end() {
        let config = DragConfig::WEEK;
        let mut drag = CreateDrag::begin(date(), y_for(540, &config), Zoom::default(), &config);
        drag.update(y_for(545, &config), &config);
        assert!(drag.has_moved());
        assert_eq!(drag.finish(&config), TimeRange::new(540, 560));
    }

    #[test]
    fn test_returning_to_press_point_is_no_movement() {
        let config = DragConfig::DAY;
        let press_y = y_for(600, &config);
        let mut drag = CreateDrag::begin(date(), press_y, Zoom::default(), &config);
        drag.update(y_for(660, &config), &config);
        assert!(drag.has_moved());
        drag.update(press_y, &config);
        assert!(!drag.has_moved());
    }

    #[test]
    fn test_end_of_day_keeps_minimum_span() {
        let config = DragConfig::DAY;
        let mut drag = CreateDrag::begin(date(), y_for(23 * 60 + 50, &config), Zoom::default(), &config);
        drag.update(y_for(23 * 60 + 55, &config), &config);
        let range = drag.finish(&config);
        assert_eq!(range.end_minutes, LAST_MINUTE);
        assert_eq!(range.duration(), config.create_min_span);
    }

    #[test]
    fn test_pointer_beyond_column_is_clamped() {
        let config = DragConfig::DAY;
        let mut drag = CreateDrag::begin(date(), y_for(60, &config), Zoom::default(), &config);
        drag.update(-500.0, &config);
        assert_eq!(drag.current, SlotTime { hour: 0, minute: 0 });
        drag.update(1.0e6, &config);
        assert_eq!(drag.current, SlotTime { hour: 23, minute: 50 });
    }
}
