use chrono::{Local, NaiveDate};
use egui::{Margin, Stroke};

use super::palette::{DayStripPalette, TimeGridPalette};
use super::time_grid::{render_time_grid, GridScroll};
use super::ViewResult;
use crate::models::planner_day::JournalField;
use crate::models::ui::DisplayMode;
use crate::services::drag::DragController;
use crate::services::layout::geometry::{ViewMetrics, Zoom};
use crate::services::layout::LayoutSource;
use crate::services::planner::{NewItem, PlannerAction, PlannerStore};
use crate::services::storage::KeyValueStore;
use crate::ui_egui::theme::PlannerTheme;

const JOURNAL_FIELDS: [(JournalField, &str); 3] = [
    (JournalField::TopPriorities, "Top priorities"),
    (JournalField::Notes, "Notes"),
    (JournalField::Reflection, "Reflection"),
];

/// Mutable widget state the Today view needs between frames.
pub struct DayViewState<'s> {
    pub scroll: &'s mut GridScroll,
    pub drag: &'s mut DragController,
    /// Text of the quick-add field
    pub quick_add: &'s mut String,
}

pub struct DayView;

impl DayView {
    #[allow(clippy::too_many_arguments)]
    pub fn show<S: KeyValueStore>(
        ui: &mut egui::Ui,
        date: NaiveDate,
        store: &PlannerStore<S>,
        mode: DisplayMode,
        zoom: Zoom,
        theme: &PlannerTheme,
        state: DayViewState<'_>,
    ) -> ViewResult {
        Self::render_header(ui, date, &DayStripPalette::from_theme(theme));
        ui.add_space(8.0);

        let layout = store.layout_for(date, mode);
        let mut result = ViewResult::default();

        egui::SidePanel::right("today_side_panel")
            .resizable(true)
            .default_width(280.0)
            .show_inside(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("today_side_scroll")
                    .show(ui, |ui| {
                        Self::render_untimed(ui, date, &layout.untimed, mode, state.quick_add, &mut result);
                        ui.separator();
                        Self::render_backlog(ui, date, store, &mut result);
                        ui.separator();
                        Self::render_journal(ui, date, store, &mut result);
                    });
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            let grid = render_time_grid(
                ui,
                "today_grid",
                &[date],
                std::slice::from_ref(&layout),
                ViewMetrics::DAY,
                zoom,
                state.scroll,
                state.drag,
                &TimeGridPalette::from_theme(theme),
            );
            result.merge(grid);
        });

        result
    }

    fn render_header(ui: &mut egui::Ui, date: NaiveDate, palette: &DayStripPalette) {
        let is_today = date == Local::now().date_naive();
        let header = egui::Frame::none()
            .fill(palette.strip_bg)
            .rounding(egui::Rounding::same(12.0))
            .stroke(Stroke::new(1.0, palette.strip_border))
            .inner_margin(Margin::symmetric(16.0, 12.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(date.format("%A").to_string())
                                .size(24.0)
                                .color(palette.text)
                                .strong(),
                        );
                        ui.label(
                            egui::RichText::new(date.format("%B %d, %Y").to_string())
                                .size(14.0)
                                .color(palette.date_text),
                        );
                    });

                    if is_today {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            egui::Frame::none()
                                .fill(palette.badge_bg)
                                .rounding(egui::Rounding::same(10.0))
                                .inner_margin(Margin::symmetric(12.0, 6.0))
                                .show(ui, |ui| {
                                    ui.label(
                                        egui::RichText::new("Today")
                                            .color(palette.badge_text)
                                            .size(12.0)
                                            .strong(),
                                    );
                                });
                        });
                    }
                });
            });

        let rect = header.response.rect;
        ui.painter()
            .hline(rect.x_range(), rect.bottom(), Stroke::new(1.0, palette.accent_line));
    }

    fn render_untimed(
        ui: &mut egui::Ui,
        date: NaiveDate,
        untimed: &[LayoutSource<'_>],
        mode: DisplayMode,
        quick_add: &mut String,
        result: &mut ViewResult,
    ) {
        ui.heading("Untimed");
        if untimed.is_empty() {
            ui.weak("Nothing without a time yet");
        }

        for source in untimed {
            match source.as_task() {
                Some(item) => {
                    ui.horizontal(|ui| {
                        let mut done = item.completed;
                        if ui.checkbox(&mut done, item.text.as_str()).changed() {
                            result.actions.push(PlannerAction::ToggleComplete {
                                id: item.id.clone(),
                            });
                        }
                        if ui.small_button("✏").on_hover_text("Edit").clicked() {
                            result.edit_item = Some(item.id.clone());
                        }
                    });
                }
                None => {
                    ui.label(format!("◆ {}", source.title()));
                }
            }
        }

        ui.add_space(4.0);
        let response = ui.add(
            egui::TextEdit::singleline(quick_add)
                .hint_text("Add a task and press Enter")
                .desired_width(f32::INFINITY),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if submitted && !quick_add.trim().is_empty() {
            result.actions.push(PlannerAction::CreateItem(NewItem {
                content_calendar: mode == DisplayMode::Content,
                ..NewItem::untimed(quick_add.trim(), Some(date))
            }));
            quick_add.clear();
            response.request_focus();
        }
    }

    fn render_backlog<S: KeyValueStore>(
        ui: &mut egui::Ui,
        date: NaiveDate,
        store: &PlannerStore<S>,
        result: &mut ViewResult,
    ) {
        egui::CollapsingHeader::new(format!("Backlog ({})", store.backlog().len()))
            .id_source("today_backlog")
            .default_open(false)
            .show(ui, |ui| {
                for item in store.backlog() {
                    ui.horizontal(|ui| {
                        ui.label(item.text.as_str());
                        if ui.small_button("Today").on_hover_text("Schedule on this day").clicked() {
                            result.actions.push(PlannerAction::MoveItem {
                                id: item.id.clone(),
                                date: Some(date),
                                range: None,
                            });
                        }
                    });
                }
            });
    }

    fn render_journal<S: KeyValueStore>(
        ui: &mut egui::Ui,
        date: NaiveDate,
        store: &PlannerStore<S>,
        result: &mut ViewResult,
    ) {
        for (field, label) in JOURNAL_FIELDS {
            ui.label(egui::RichText::new(label).strong());
            let mut text = store
                .day(date)
                .map(|day| day.journal(field).to_string())
                .unwrap_or_default();
            let edit = egui::TextEdit::multiline(&mut text)
                .id_source(("journal", field as u8))
                .desired_rows(3)
                .desired_width(f32::INFINITY);
            if ui.add(edit).changed() {
                result.actions.push(PlannerAction::SetDayNotes { date, field, text });
            }
            ui.add_space(6.0);
        }
    }
}
