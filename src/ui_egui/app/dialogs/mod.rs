mod create;
mod item_editor;

use super::PlannerApp;

impl PlannerApp {
    pub(super) fn handle_dialogs(&mut self, ctx: &egui::Context) {
        if self.state.create_dialog.is_some() {
            self.render_create_dialog(ctx);
        }

        if self.state.item_editor.is_some() {
            self.render_item_editor(ctx);
        }
    }
}
