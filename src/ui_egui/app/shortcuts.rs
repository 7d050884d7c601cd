use super::PlannerApp;
use crate::models::ui::ViewType;
use crate::ui_egui::drag::outcome_action;

impl PlannerApp {
    pub(super) fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        // Letters and arrows belong to the focused text field while typing
        let typing = ctx.wants_keyboard_input();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                if !self.state.drag.is_idle() {
                    let outcome = self.state.drag.cancel();
                    log::debug!("Drag cancelled: {:?}", outcome);
                    if let Some(action) = outcome_action(outcome) {
                        self.dispatch(action);
                    }
                } else if self.state.create_dialog.is_some() {
                    self.state.create_dialog = None;
                } else if self.state.item_editor.is_some() {
                    self.state.item_editor = None;
                }
            }

            if i.modifiers.ctrl && i.key_pressed(egui::Key::T) {
                self.jump_to_today();
            }

            if i.modifiers.ctrl && (i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals)) {
                self.set_zoom(self.store.zoom().zoom_in());
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::Minus) {
                self.set_zoom(self.store.zoom().zoom_out());
            }

            if typing || self.state.has_open_dialog() || i.modifiers.ctrl {
                return;
            }

            if i.key_pressed(egui::Key::D) {
                self.switch_view(ViewType::Today);
            }
            if i.key_pressed(egui::Key::W) {
                self.switch_view(ViewType::Week);
            }
            if i.key_pressed(egui::Key::M) {
                self.switch_view(ViewType::Month);
            }

            if i.key_pressed(egui::Key::ArrowLeft) {
                self.navigate_previous();
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                self.navigate_next();
            }
        });
    }
}
