use chrono::{Datelike, Local, NaiveDate};
use egui::{Align2, CursorIcon, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

use super::palette::CalendarCellPalette;
use super::utils::weekday_labels;
use super::ViewResult;
use crate::models::ui::DisplayMode;
use crate::services::planner::{DaySummary, PlannerStore};
use crate::services::storage::KeyValueStore;
use crate::ui_egui::theme::PlannerTheme;
use crate::utils::date::month_grid;

const HEADER_HEIGHT: f32 = 24.0;
const CELL_SPACING: f32 = 3.0;
const MIN_CELL_HEIGHT: f32 = 60.0;

pub struct MonthView;

impl MonthView {
    /// Month overview with per-day counts; clicking a day opens it in Today.
    pub fn show<S: KeyValueStore>(
        ui: &mut egui::Ui,
        current_date: NaiveDate,
        first_day_of_week: u8,
        store: &PlannerStore<S>,
        mode: DisplayMode,
        theme: &PlannerTheme,
    ) -> ViewResult {
        let today = Local::now().date_naive();
        let palette = CalendarCellPalette::from_theme(theme);
        let dates = month_grid(current_date, first_day_of_week);
        let weeks = (dates.len() / 7).max(1);

        ui.horizontal(|ui| {
            ui.heading(current_date.format("%B %Y").to_string());
        });
        ui.add_space(6.0);

        let available = ui.available_size();
        let cell_width = ((available.x - CELL_SPACING * 6.0) / 7.0).max(40.0);
        let cell_height =
            ((available.y - HEADER_HEIGHT - CELL_SPACING * weeks as f32) / weeks as f32).max(MIN_CELL_HEIGHT);

        let (rect, _) = ui.allocate_exact_size(
            Vec2::new(available.x, HEADER_HEIGHT + (cell_height + CELL_SPACING) * weeks as f32),
            Sense::hover(),
        );

        let painter = ui.painter_at(rect);
        for (index, name) in weekday_labels(first_day_of_week).iter().enumerate() {
            let x = rect.left() + index as f32 * (cell_width + CELL_SPACING) + cell_width / 2.0;
            painter.text(
                Pos2::new(x, rect.top() + HEADER_HEIGHT / 2.0),
                Align2::CENTER_CENTER,
                name,
                FontId::proportional(12.0),
                palette.muted_text,
            );
        }

        let mut result = ViewResult::default();
        for (index, date) in dates.iter().enumerate() {
            let row = (index / 7) as f32;
            let col = (index % 7) as f32;
            let cell = Rect::from_min_size(
                Pos2::new(
                    rect.left() + col * (cell_width + CELL_SPACING),
                    rect.top() + HEADER_HEIGHT + row * (cell_height + CELL_SPACING),
                ),
                Vec2::new(cell_width, cell_height),
            );

            let summary = store.summary_for(*date, mode);
            let in_month = date.month() == current_date.month();
            let response = ui
                .interact(cell, ui.id().with(("month_cell", *date)), Sense::click())
                .on_hover_cursor(CursorIcon::PointingHand);

            Self::paint_cell(ui, cell, *date, &summary, in_month, *date == today, response.hovered(), &palette);

            if response.clicked() {
                result.open_date = Some(*date);
            }
        }

        result
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_cell(
        ui: &egui::Ui,
        cell: Rect,
        date: NaiveDate,
        summary: &DaySummary,
        in_month: bool,
        is_today: bool,
        hovered: bool,
        palette: &CalendarCellPalette,
    ) {
        let painter = ui.painter();
        let fill = if is_today {
            palette.today_bg
        } else if in_month {
            palette.regular_bg
        } else {
            palette.outside_bg
        };
        let border = if is_today {
            Stroke::new(2.0, palette.today_border)
        } else if hovered {
            Stroke::new(1.5, palette.hover_border)
        } else {
            Stroke::new(1.0, palette.border)
        };
        painter.rect(cell, Rounding::same(4.0), fill, border);

        let text_color = if in_month { palette.text } else { palette.muted_text };
        painter.text(
            cell.left_top() + Vec2::new(6.0, 4.0),
            Align2::LEFT_TOP,
            date.day().to_string(),
            FontId::proportional(13.0),
            text_color,
        );

        let mut y = cell.top() + 24.0;
        if summary.tasks > 0 {
            Self::paint_count(
                painter,
                Pos2::new(cell.left() + 8.0, y),
                palette.task_dot,
                format!("{}/{} done", summary.completed, summary.tasks),
                palette.muted_text,
            );
            y += 16.0;
        }
        if summary.content > 0 && y < cell.bottom() - 8.0 {
            Self::paint_count(
                painter,
                Pos2::new(cell.left() + 8.0, y),
                palette.content_dot,
                format!("{} content", summary.content),
                palette.muted_text,
            );
        }
    }

    fn paint_count(painter: &egui::Painter, at: Pos2, dot: egui::Color32, label: String, color: egui::Color32) {
        painter.circle_filled(at, 3.5, dot);
        painter.text(
            at + Vec2::new(8.0, 0.0),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(11.0),
            color,
        );
    }
}
