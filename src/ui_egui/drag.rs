//! Pointer glue between egui and the drag controller.
//!
//! The controller works in day-column coordinates; these helpers translate
//! screen positions into samples and decide which part of a block was hit.

use chrono::NaiveDate;
use egui::{Pos2, Rect};

use crate::models::ui::ViewType;
use crate::services::drag::{DragOutcome, DragView, PointerSample, ResizeEdge};
use crate::services::planner::PlannerAction;

/// Height of the grab zone at each end of a block.
pub const HANDLE_HEIGHT: f32 = 6.0;

/// Which part of a block the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockHit {
    Edge(ResizeEdge),
    Body,
}

/// Hit-test a painted block. Short blocks shrink their handles so the body
/// stays grabbable.
pub fn hit_block(rect: Rect, pos: Pos2) -> Option<BlockHit> {
    if !rect.contains(pos) {
        return None;
    }

    let handle = HANDLE_HEIGHT.min(rect.height() / 3.0);
    if pos.y <= rect.top() + handle {
        Some(BlockHit::Edge(ResizeEdge::Top))
    } else if pos.y >= rect.bottom() - handle {
        Some(BlockHit::Edge(ResizeEdge::Bottom))
    } else {
        Some(BlockHit::Body)
    }
}

/// One day column of a time grid in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub rect: Rect,
}

impl DayColumn {
    /// Offset of `pos` from the column's midnight line.
    pub fn offset_of(&self, pos: Pos2) -> f32 {
        pos.y - self.rect.top()
    }
}

/// Column whose rect contains `pos`.
pub fn column_at(columns: &[DayColumn], pos: Pos2) -> Option<&DayColumn> {
    columns.iter().find(|column| column.rect.contains(pos))
}

/// Sample for a pointer that may have left the grid: the column under the
/// pointer horizontally, else the nearest one.
pub fn sample_at(columns: &[DayColumn], pos: Pos2) -> Option<PointerSample> {
    let distance = |column: &DayColumn| (column.rect.center().x - pos.x).abs();
    let column = columns
        .iter()
        .find(|column| column.rect.x_range().contains(pos.x))
        .or_else(|| columns.iter().min_by(|a, b| distance(a).total_cmp(&distance(b))))?;

    Some(PointerSample {
        date: column.date,
        y: column.offset_of(pos),
    })
}

/// Drag rules used by each calendar view.
pub fn drag_view_for(view: ViewType) -> DragView {
    match view {
        ViewType::Week => DragView::Week,
        ViewType::Today | ViewType::Month => DragView::Day,
    }
}

/// Store action needed after a release or cancel, if any.
///
/// Create requests are not handled here: they open the create dialog.
pub fn outcome_action(outcome: DragOutcome) -> Option<PlannerAction> {
    match outcome {
        DragOutcome::Revert(item) => Some(PlannerAction::UpdateItem(item)),
        DragOutcome::Ignored
        | DragOutcome::Discarded
        | DragOutcome::Create(_)
        | DragOutcome::Finished => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::planner_item::PlannerItem;
    use egui::{pos2, vec2};

    fn columns() -> Vec<DayColumn> {
        let first = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        (0..3)
            .map(|i| DayColumn {
                date: first + chrono::Duration::days(i),
                rect: Rect::from_min_size(pos2(50.0 + i as f32 * 100.0, 10.0), vec2(98.0, 1000.0)),
            })
            .collect()
    }

    #[test]
    fn test_hit_block_zones() {
        let rect = Rect::from_min_size(pos2(0.0, 100.0), vec2(80.0, 60.0));
        assert_eq!(hit_block(rect, pos2(10.0, 102.0)), Some(BlockHit::Edge(ResizeEdge::Top)));
        assert_eq!(hit_block(rect, pos2(10.0, 158.0)), Some(BlockHit::Edge(ResizeEdge::Bottom)));
        assert_eq!(hit_block(rect, pos2(10.0, 130.0)), Some(BlockHit::Body));
        assert_eq!(hit_block(rect, pos2(90.0, 130.0)), None);
    }

    #[test]
    fn test_short_block_keeps_body() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(80.0, 9.0));
        assert_eq!(hit_block(rect, pos2(10.0, 4.5)), Some(BlockHit::Body));
    }

    #[test]
    fn test_sample_uses_column_under_pointer() {
        let columns = columns();
        let sample = sample_at(&columns, pos2(170.0, 310.0)).unwrap();
        assert_eq!(sample.date, columns[1].date);
        assert_eq!(sample.y, 300.0);
    }

    #[test]
    fn test_sample_outside_grid_snaps_to_nearest_column() {
        let columns = columns();
        assert_eq!(sample_at(&columns, pos2(900.0, 10.0)).unwrap().date, columns[2].date);
        assert_eq!(sample_at(&columns, pos2(0.0, 10.0)).unwrap().date, columns[0].date);
        assert!(sample_at(&[], pos2(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_column_at_requires_containment() {
        let columns = columns();
        assert!(column_at(&columns, pos2(20.0, 50.0)).is_none());
        assert_eq!(column_at(&columns, pos2(60.0, 50.0)).map(|c| c.date), Some(columns[0].date));
    }

    #[test]
    fn test_revert_becomes_update() {
        let item = PlannerItem::new("a", "A", None);
        assert_eq!(
            outcome_action(DragOutcome::Revert(item.clone())),
            Some(PlannerAction::UpdateItem(item))
        );
        assert_eq!(outcome_action(DragOutcome::Finished), None);
    }
}
