use chrono::{Local, NaiveDate};
use egui::{Align2, CursorIcon, FontId, Margin, Rounding, Sense, Stroke, Vec2};

use super::palette::{DayStripPalette, TimeGridPalette};
use super::time_grid::{day_columns, render_time_grid, GridScroll};
use super::utils::weekday_labels;
use super::ViewResult;
use crate::models::ui::DisplayMode;
use crate::services::drag::DragController;
use crate::services::layout::geometry::{ViewMetrics, Zoom};
use crate::services::layout::DayLayout;
use crate::services::planner::PlannerStore;
use crate::services::storage::KeyValueStore;
use crate::ui_egui::drag::column_at;
use crate::ui_egui::theme::PlannerTheme;
use crate::utils::date::week_days;

const HEADER_HEIGHT: f32 = 48.0;

pub struct WeekView;

impl WeekView {
    #[allow(clippy::too_many_arguments)]
    pub fn show<S: KeyValueStore>(
        ui: &mut egui::Ui,
        current_date: NaiveDate,
        first_day_of_week: u8,
        store: &PlannerStore<S>,
        mode: DisplayMode,
        zoom: Zoom,
        theme: &PlannerTheme,
        scroll: &mut GridScroll,
        drag: &mut DragController,
    ) -> ViewResult {
        let dates = week_days(current_date, first_day_of_week);
        let layouts: Vec<DayLayout<'_>> = dates.iter().map(|date| store.layout_for(*date, mode)).collect();

        let mut result = ViewResult::default();
        result.open_date = Self::render_header(
            ui,
            &dates,
            &layouts,
            first_day_of_week,
            &DayStripPalette::from_theme(theme),
        );
        ui.add_space(4.0);

        let grid = render_time_grid(
            ui,
            "week_grid",
            &dates,
            &layouts,
            ViewMetrics::WEEK,
            zoom,
            scroll,
            drag,
            &TimeGridPalette::from_theme(theme),
        );
        result.merge(grid);
        result
    }

    /// Day name strip aligned with the grid columns. Returns the clicked date.
    fn render_header(
        ui: &mut egui::Ui,
        dates: &[NaiveDate],
        layouts: &[DayLayout<'_>],
        first_day_of_week: u8,
        palette: &DayStripPalette,
    ) -> Option<NaiveDate> {
        let today = Local::now().date_naive();
        let day_names = weekday_labels(first_day_of_week);

        let frame = egui::Frame::none()
            .fill(palette.strip_bg)
            .rounding(Rounding::same(10.0))
            .stroke(Stroke::new(1.0, palette.strip_border))
            .inner_margin(Margin::symmetric(0.0, 8.0));

        frame
            .show(ui, |ui| {
                let (rect, response) = ui.allocate_exact_size(
                    Vec2::new(ui.available_width(), HEADER_HEIGHT),
                    Sense::click(),
                );
                let columns = day_columns(rect, dates);
                let painter = ui.painter_at(rect);

                for ((column, name), layout) in columns.iter().zip(&day_names).zip(layouts) {
                    let is_today = column.date == today;
                    let cell = column.rect.shrink2(Vec2::new(2.0, 0.0));
                    if is_today {
                        painter.rect_stroke(cell, Rounding::same(6.0), Stroke::new(1.5, palette.accent_line));
                    }

                    let name_color = if is_today { palette.accent_line } else { palette.text };
                    painter.text(
                        cell.center_top() + Vec2::new(0.0, 4.0),
                        Align2::CENTER_TOP,
                        name,
                        FontId::proportional(12.0),
                        name_color,
                    );
                    painter.text(
                        cell.center_top() + Vec2::new(0.0, 20.0),
                        Align2::CENTER_TOP,
                        column.date.format("%d %b").to_string(),
                        FontId::proportional(11.0),
                        palette.date_text,
                    );

                    if !layout.untimed.is_empty() {
                        painter.text(
                            cell.right_top() + Vec2::new(-4.0, 4.0),
                            Align2::RIGHT_TOP,
                            layout.untimed.len().to_string(),
                            FontId::proportional(10.0),
                            palette.badge_bg,
                        );
                    }
                }

                let response = response.on_hover_cursor(CursorIcon::PointingHand);
                if response.clicked() {
                    return response
                        .interact_pointer_pos()
                        .and_then(|pos| column_at(&columns, pos))
                        .map(|column| column.date);
                }
                None
            })
            .inner
    }
}
