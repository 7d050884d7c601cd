//! Time grid rendering for the Today and Week views.
//!
//! Paints hour rows and the positioned blocks of each day column, then drives
//! the drag controller from the grid's pointer response. Block placement comes
//! entirely from the layout service; this module only converts it to rects.

use chrono::{Local, NaiveDate, Timelike};
use egui::{Align2, CursorIcon, FontId, Painter, PointerButton, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

use super::palette::{with_alpha, TimeGridPalette};
use super::utils::{block_fill, format_range};
use super::ViewResult;
use crate::services::drag::{DragController, DragOutcome, DragUpdate, TimeRange};
use crate::services::layout::geometry::{anchored_scroll_offset, entry_geometry, ViewMetrics, Zoom};
use crate::services::layout::{DayLayout, TimedLayoutEntry};
use crate::ui_egui::drag::{column_at, hit_block, sample_at, BlockHit, DayColumn};

pub const TIME_LABEL_WIDTH: f32 = 50.0;
pub const COLUMN_SPACING: f32 = 2.0;

/// Scroll state of a time grid, kept across frames.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GridScroll {
    pub offset: f32,
    pub viewport_height: f32,
    /// Offset to apply on the next frame
    pub pending: Option<f32>,
}

impl GridScroll {
    pub fn new(offset: f32) -> Self {
        Self {
            offset,
            viewport_height: 0.0,
            pending: Some(offset),
        }
    }

    pub fn jump_to(&mut self, offset: f32) {
        self.offset = offset;
        self.pending = Some(offset);
    }

    /// Keep the middle of the viewport fixed across a zoom change.
    pub fn rezoom(&mut self, old_zoom: Zoom, new_zoom: Zoom) {
        let anchor = self.viewport_height / 2.0;
        self.jump_to(anchored_scroll_offset(self.offset, anchor, old_zoom, new_zoom));
    }
}

/// A block painted this frame, kept for hit-testing.
struct PlacedBlock<'a> {
    column: DayColumn,
    rect: Rect,
    entry: TimedLayoutEntry<'a>,
}

/// Split a grid rect into day columns to the right of the time labels.
pub(crate) fn day_columns(rect: Rect, dates: &[NaiveDate]) -> Vec<DayColumn> {
    let left = rect.left() + TIME_LABEL_WIDTH;
    let count = dates.len().max(1) as f32;
    let width = ((rect.right() - left - COLUMN_SPACING * (count - 1.0)) / count).max(1.0);

    dates
        .iter()
        .enumerate()
        .map(|(index, date)| DayColumn {
            date: *date,
            rect: Rect::from_min_size(
                Pos2::new(left + index as f32 * (width + COLUMN_SPACING), rect.top()),
                Vec2::new(width, rect.height()),
            ),
        })
        .collect()
}

/// Render the scrollable grid for `dates`, one layout per date.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_time_grid(
    ui: &mut egui::Ui,
    id_source: &str,
    dates: &[NaiveDate],
    layouts: &[DayLayout<'_>],
    metrics: ViewMetrics,
    zoom: Zoom,
    scroll: &mut GridScroll,
    drag: &mut DragController,
    palette: &TimeGridPalette,
) -> ViewResult {
    let mut result = ViewResult::default();

    let mut area = egui::ScrollArea::vertical()
        .id_source(id_source)
        .auto_shrink([false, false]);
    if let Some(offset) = scroll.pending.take() {
        area = area.vertical_scroll_offset(offset);
    }

    let output = area.show(ui, |ui| {
        render_grid_body(ui, dates, layouts, metrics, zoom, drag, palette, &mut result);
    });

    let viewport = output.inner_rect;
    scroll.offset = output.state.offset.y;
    scroll.viewport_height = viewport.height();

    // Ctrl+wheel / pinch: zoom about the cursor
    let zoom_delta = ui.input(|i| i.zoom_delta());
    if (zoom_delta - 1.0).abs() > f32::EPSILON {
        let hover = ui
            .input(|i| i.pointer.hover_pos())
            .filter(|pos| viewport.contains(*pos));
        if let Some(pointer) = hover {
            let new_zoom = zoom.scaled(zoom_delta);
            if new_zoom != zoom {
                scroll.jump_to(anchored_scroll_offset(
                    scroll.offset,
                    pointer.y - viewport.top(),
                    zoom,
                    new_zoom,
                ));
                result.zoom = Some(new_zoom);
            }
        }
    }

    result
}

#[allow(clippy::too_many_arguments)]
fn render_grid_body(
    ui: &mut egui::Ui,
    dates: &[NaiveDate],
    layouts: &[DayLayout<'_>],
    metrics: ViewMetrics,
    zoom: Zoom,
    drag: &mut DragController,
    palette: &TimeGridPalette,
    result: &mut ViewResult,
) {
    let size = Vec2::new(ui.available_width(), metrics.content_height(zoom));
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
    let painter = ui.painter_at(rect);
    let columns = day_columns(rect, dates);
    let today = Local::now().date_naive();

    for column in &columns {
        let fill = if column.date == today {
            palette.today_bg
        } else {
            palette.regular_bg
        };
        painter.rect_filled(column.rect, 0.0, fill);
    }
    paint_hour_lines(&painter, rect, metrics, zoom, palette);

    let mut blocks = Vec::new();
    for (column, layout) in columns.iter().zip(layouts) {
        for entry in layout.paint_order() {
            let block_rect = entry_rect(column.rect, entry, &metrics, zoom);
            let active = drag.active_item() == Some(entry.source.id());
            paint_block(&painter, block_rect, entry, palette, active);
            blocks.push(PlacedBlock {
                column: *column,
                rect: block_rect,
                entry: *entry,
            });
        }
    }

    if let Some(preview) = drag.create_preview() {
        if let Some(column) = columns.iter().find(|column| column.date == preview.date) {
            paint_create_preview(&painter, column.rect, preview.range, &metrics, zoom, palette);
        }
    }

    if let Some(column) = columns.iter().find(|column| column.date == today) {
        let now = Local::now().time();
        let minutes = (now.hour() * 60 + now.minute()) as i32;
        let y = column.rect.top() + metrics.offset_of(minutes, zoom);
        painter.circle_filled(Pos2::new(column.rect.left() - 4.0, y), 3.0, palette.now_line);
        painter.hline(column.rect.x_range(), y, Stroke::new(2.0, palette.now_line));
    }

    if let Some(hover) = response.hover_pos() {
        if let Some((block, hit)) = topmost_hit(&blocks, hover) {
            if block.entry.source.is_task() {
                ui.ctx().set_cursor_icon(match hit {
                    BlockHit::Edge(_) => CursorIcon::ResizeVertical,
                    BlockHit::Body => CursorIcon::Grab,
                });
            }
        }
    }

    handle_pointer(ui, &response, &columns, &blocks, zoom, drag, result);
}

fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    columns: &[DayColumn],
    blocks: &[PlacedBlock<'_>],
    zoom: Zoom,
    drag: &mut DragController,
    result: &mut ViewResult,
) {
    if response.drag_started_by(PointerButton::Primary) {
        if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
            press(origin, columns, blocks, zoom, drag);
        }
    }

    if response.dragged_by(PointerButton::Primary) {
        let sample = response
            .interact_pointer_pos()
            .and_then(|pos| sample_at(columns, pos));
        if let Some(sample) = sample {
            match drag.on_press_move(sample) {
                Some(DragUpdate::Commit(commit)) => result.actions.push(commit.into()),
                Some(DragUpdate::Preview { .. }) | None => {}
            }
        }
    }

    if response.drag_stopped_by(PointerButton::Primary) {
        if let DragOutcome::Create(request) = drag.on_press_end() {
            result.create_request = Some(request);
        }
    }

    if response.double_clicked() {
        let target = response
            .interact_pointer_pos()
            .and_then(|pos| topmost_hit(blocks, pos))
            .and_then(|(block, _)| block.entry.source.as_task());
        if let Some(item) = target {
            result.edit_item = Some(item.id.clone());
        }
    }
}

/// Start whichever interaction the press position calls for.
fn press(origin: Pos2, columns: &[DayColumn], blocks: &[PlacedBlock<'_>], zoom: Zoom, drag: &mut DragController) {
    if let Some((block, hit)) = topmost_hit(blocks, origin) {
        let Some(item) = block.entry.source.as_task() else {
            log::debug!("Content card '{}' is read-only on the planner", block.entry.source.id());
            return;
        };
        let y = block.column.offset_of(origin);
        match hit {
            BlockHit::Edge(edge) => drag.press_resize_handle(item, block.column.date, edge, y, zoom),
            BlockHit::Body => drag.press_item(item, block.column.date, y, zoom),
        };
        return;
    }

    if let Some(column) = column_at(columns, origin) {
        drag.press_empty_slot(column.date, column.offset_of(origin), zoom);
    }
}

/// Last painted block under `pos`, which is the one drawn on top.
fn topmost_hit<'b, 'a>(blocks: &'b [PlacedBlock<'a>], pos: Pos2) -> Option<(&'b PlacedBlock<'a>, BlockHit)> {
    blocks
        .iter()
        .rev()
        .find_map(|block| hit_block(block.rect, pos).map(|hit| (block, hit)))
}

fn entry_rect(column: Rect, entry: &TimedLayoutEntry<'_>, metrics: &ViewMetrics, zoom: Zoom) -> Rect {
    let geometry = entry_geometry(entry, metrics, zoom);
    let (left, right) = geometry.x_range(column.left(), column.width());
    Rect::from_min_max(
        Pos2::new(left + 1.0, column.top() + geometry.top),
        Pos2::new(right - 1.0, column.top() + geometry.top + geometry.height),
    )
}

fn paint_hour_lines(painter: &Painter, rect: Rect, metrics: ViewMetrics, zoom: Zoom, palette: &TimeGridPalette) {
    let lines_left = rect.left() + TIME_LABEL_WIDTH;
    let show_half_hours = metrics.scale(zoom) * 30.0 >= 20.0;

    for hour in 0..24 {
        let y = rect.top() + metrics.offset_of(hour * 60, zoom);
        painter.hline(lines_left..=rect.right(), y, Stroke::new(1.0, palette.hour_line));
        painter.text(
            Pos2::new(lines_left - 6.0, y + 2.0),
            Align2::RIGHT_TOP,
            format!("{:02}:00", hour),
            FontId::proportional(11.0),
            palette.label,
        );

        if show_half_hours {
            let half = rect.top() + metrics.offset_of(hour * 60 + 30, zoom);
            painter.hline(lines_left..=rect.right(), half, Stroke::new(0.5, palette.slot_line));
        }
    }
}

fn paint_block(painter: &Painter, rect: Rect, entry: &TimedLayoutEntry<'_>, palette: &TimeGridPalette, active: bool) {
    let base = block_fill(&entry.source, palette);
    let fill = if entry.source.is_completed() {
        with_alpha(base, 110)
    } else {
        base
    };
    let stroke = if active {
        Stroke::new(2.0, palette.active_border)
    } else {
        Stroke::new(1.0, palette.block_border)
    };

    painter.rect_filled(rect, Rounding::same(4.0), fill);
    painter.rect_stroke(rect, Rounding::same(4.0), stroke);

    let text_painter = painter.with_clip_rect(rect.shrink(2.0));
    text_painter.text(
        rect.left_top() + Vec2::new(4.0, 3.0),
        Align2::LEFT_TOP,
        entry.source.title(),
        FontId::proportional(12.0),
        palette.block_text,
    );
    if rect.height() >= 32.0 {
        text_painter.text(
            rect.left_top() + Vec2::new(4.0, 18.0),
            Align2::LEFT_TOP,
            format_range(entry.start_minutes, entry.end_minutes),
            FontId::proportional(10.0),
            with_alpha(palette.block_text, 180),
        );
    }
}

fn paint_create_preview(
    painter: &Painter,
    column: Rect,
    range: TimeRange,
    metrics: &ViewMetrics,
    zoom: Zoom,
    palette: &TimeGridPalette,
) {
    let top = column.top() + metrics.offset_of(range.start_minutes, zoom);
    let bottom = column.top() + metrics.offset_of(range.end_minutes, zoom);
    let rect = Rect::from_min_max(Pos2::new(column.left() + 1.0, top), Pos2::new(column.right() - 1.0, bottom));

    painter.rect_filled(rect, Rounding::same(4.0), palette.preview_fill);
    painter.rect_stroke(rect, Rounding::same(4.0), Stroke::new(1.0, palette.active_border));
    painter.text(
        rect.left_top() + Vec2::new(4.0, 2.0),
        Align2::LEFT_TOP,
        format_range(range.start_minutes, range.end_minutes),
        FontId::proportional(11.0),
        palette.block_text,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_day_columns_share_width() {
        let first = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let dates: Vec<NaiveDate> = (0..7).map(|i| first + chrono::Duration::days(i)).collect();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(TIME_LABEL_WIDTH + 7.0 * 100.0 + 6.0 * COLUMN_SPACING, 500.0));

        let columns = day_columns(rect, &dates);

        assert_eq!(columns.len(), 7);
        assert!((columns[0].rect.left() - TIME_LABEL_WIDTH).abs() < 1e-3);
        assert!((columns[0].rect.width() - 100.0).abs() < 1e-3);
        assert!((columns[6].rect.right() - rect.right()).abs() < 1e-3);
    }

    #[test]
    fn test_rezoom_keeps_viewport_centre() {
        let mut scroll = GridScroll {
            offset: 600.0,
            viewport_height: 400.0,
            pending: None,
        };
        scroll.rezoom(Zoom::new(1.0), Zoom::new(1.5));
        // content at 800 moves to 1200 and stays 200px below the top
        assert_eq!(scroll.pending, Some(1000.0));
    }
}
