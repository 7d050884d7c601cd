use crate::models::planner_item::PlannerItem;
use crate::models::ui::ViewType;
use crate::services::drag::{CreateRequest, DragController};
use crate::services::layout::geometry::{ViewMetrics, Zoom};
use crate::ui_egui::drag::drag_view_for;
use crate::ui_egui::views::time_grid::GridScroll;

/// Whether a drag-to-create becomes a task or a planned content card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateKind {
    Task,
    Content,
}

/// State of the dialog shown after a drag-to-create.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDialogState {
    pub request: CreateRequest,
    pub title: String,
    pub kind: CreateKind,
}

impl CreateDialogState {
    pub fn new(request: CreateRequest) -> Self {
        Self {
            request,
            title: String::new(),
            kind: CreateKind::Task,
        }
    }
}

/// Draft copy of a task being edited; changes apply on Save.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEditorState {
    pub draft: PlannerItem,
    pub color_input: String,
    pub error: Option<String>,
}

impl ItemEditorState {
    pub fn new(item: PlannerItem) -> Self {
        Self {
            color_input: item.color.clone().unwrap_or_default(),
            draft: item,
            error: None,
        }
    }
}

pub struct AppState {
    pub scroll: GridScroll,
    /// Current scroll in Today-view pixels; survives view switches
    pub day_offset: f32,
    /// Last offset handed to the store
    pub saved_day_offset: f32,
    pub drag: DragController,
    pub quick_add: String,
    pub create_dialog: Option<CreateDialogState>,
    pub item_editor: Option<ItemEditorState>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(view: ViewType, day_offset: f32) -> Self {
        let scroll = match metrics_for(view) {
            Some(metrics) => GridScroll::new(view_offset(day_offset, metrics)),
            None => GridScroll::default(),
        };
        Self {
            scroll,
            day_offset,
            saved_day_offset: day_offset,
            drag: DragController::for_view(drag_view_for(view)),
            quick_add: String::new(),
            create_dialog: None,
            item_editor: None,
            status_message: None,
        }
    }

    pub fn has_open_dialog(&self) -> bool {
        self.create_dialog.is_some() || self.item_editor.is_some()
    }
}

/// Grid metrics of a view; Month has no time grid.
pub fn metrics_for(view: ViewType) -> Option<ViewMetrics> {
    match view {
        ViewType::Today => Some(ViewMetrics::DAY),
        ViewType::Week => Some(ViewMetrics::WEEK),
        ViewType::Month => None,
    }
}

/// Convert a grid offset to Today-view pixels.
pub fn day_offset(offset: f32, metrics: ViewMetrics) -> f32 {
    offset * ViewMetrics::DAY.px_per_minute / metrics.px_per_minute
}

/// Convert Today-view pixels to a grid offset in `metrics`.
pub fn view_offset(day_offset: f32, metrics: ViewMetrics) -> f32 {
    day_offset * metrics.px_per_minute / ViewMetrics::DAY.px_per_minute
}

/// Today-view offset that puts `hour` at the top of the grid.
pub fn initial_day_offset(hour: u8, zoom: Zoom) -> f32 {
    ViewMetrics::DAY.offset_of(i32::from(hour.min(23)) * 60, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::services::drag::TimeRange;

    #[test]
    fn test_offsets_convert_between_views() {
        let week = view_offset(900.0, ViewMetrics::WEEK);
        assert!((week - 480.0).abs() < 1e-3);
        assert!((day_offset(week, ViewMetrics::WEEK) - 900.0).abs() < 1e-3);
    }

    #[test]
    fn test_initial_offset_uses_zoomed_day_scale() {
        assert!((initial_day_offset(7, Zoom::default()) - 630.0).abs() < 1e-3);
        assert!((initial_day_offset(7, Zoom::new(0.5)) - 315.0).abs() < 1e-3);
    }

    #[test]
    fn test_month_has_no_grid() {
        assert!(metrics_for(ViewType::Month).is_none());
        let state = AppState::new(ViewType::Month, 630.0);
        assert_eq!(state.scroll.pending, None);
    }

    #[test]
    fn test_new_state_scrolls_week_grid() {
        let state = AppState::new(ViewType::Week, 900.0);
        let pending = state.scroll.pending.unwrap();
        assert!((pending - 480.0).abs() < 1e-3);
        assert!(!state.has_open_dialog());
    }

    #[test]
    fn test_editor_starts_from_item_color() {
        let mut item = PlannerItem::new("a", "A", None);
        item.color = Some("#abc".into());
        let editor = ItemEditorState::new(item);
        assert_eq!(editor.color_input, "#abc");

        let request = CreateRequest {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            range: TimeRange::new(540, 600),
        };
        let dialog = CreateDialogState::new(request);
        assert_eq!(dialog.kind, CreateKind::Task);
        assert!(dialog.title.is_empty());
    }
}
