use super::PlannerApp;
use crate::models::ui::{DisplayMode, ViewType};
use crate::utils::date::week_start;

impl PlannerApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                for view in ViewType::ALL {
                    if ui
                        .selectable_label(self.current_view == view, view.label())
                        .clicked()
                    {
                        self.switch_view(view);
                    }
                }

                ui.separator();

                if ui.button("◀").on_hover_text("Previous (←)").clicked() {
                    self.navigate_previous();
                }
                if ui.button("Today").on_hover_text("Ctrl+T").clicked() {
                    self.jump_to_today();
                }
                if ui.button("▶").on_hover_text("Next (→)").clicked() {
                    self.navigate_next();
                }
                ui.label(egui::RichText::new(self.title_for_view()).strong());

                ui.separator();

                let mut mode = self.display_mode;
                egui::ComboBox::from_id_source("display_mode")
                    .selected_text(mode.label())
                    .show_ui(ui, |ui| {
                        for option in DisplayMode::ALL {
                            ui.selectable_value(&mut mode, option, option.label());
                        }
                    });
                if mode != self.display_mode {
                    self.set_display_mode(mode);
                }

                if self.current_view != ViewType::Month {
                    ui.separator();
                    let zoom = self.store.zoom();
                    if ui.small_button("−").on_hover_text("Zoom out (Ctrl+-)").clicked() {
                        self.set_zoom(zoom.zoom_out());
                    }
                    ui.label(format!("{:.0}%", zoom.value() * 100.0));
                    if ui.small_button("+").on_hover_text("Zoom in (Ctrl+=)").clicked() {
                        self.set_zoom(zoom.zoom_in());
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let dark = self.config.dark_mode;
                    let icon = if dark { "☀" } else { "🌙" };
                    if ui.button(icon).on_hover_text("Toggle dark mode").clicked() {
                        self.set_dark_mode(ctx, !dark);
                    }

                    let mut dismiss = false;
                    if let Some(message) = &self.state.status_message {
                        if ui.small_button("✖").clicked() {
                            dismiss = true;
                        }
                        ui.colored_label(ui.visuals().error_fg_color, message);
                    }
                    if dismiss {
                        self.state.status_message = None;
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn title_for_view(&self) -> String {
        match self.current_view {
            ViewType::Today => self.current_date.format("%a %d %B %Y").to_string(),
            ViewType::Week => format!(
                "Week of {}",
                week_start(self.current_date, self.config.first_day_of_week).format("%d %b %Y")
            ),
            ViewType::Month => self.current_date.format("%B %Y").to_string(),
        }
    }
}
