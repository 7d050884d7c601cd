use super::super::state::ItemEditorState;
use super::super::PlannerApp;
use crate::models::planner_item::is_valid_hex_color;
use crate::services::planner::PlannerAction;

enum EditorAction {
    Save,
    ClearTime,
    MoveToBacklog,
    Delete,
    Close,
}

impl PlannerApp {
    pub(super) fn render_item_editor(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.state.item_editor.as_mut() else {
            return;
        };

        let mut is_open = true;
        let mut pending: Option<EditorAction> = None;

        egui::Window::new("Edit task")
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .open(&mut is_open)
            .show(ctx, |ui| {
                egui::Grid::new("item_editor_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Text");
                        ui.text_edit_singleline(&mut editor.draft.text);
                        ui.end_row();

                        ui.label("Description");
                        let description = editor.draft.description.get_or_insert_with(String::new);
                        ui.add(egui::TextEdit::multiline(description).desired_rows(3));
                        ui.end_row();

                        ui.label("Color");
                        ui.add(
                            egui::TextEdit::singleline(&mut editor.color_input)
                                .hint_text("#RRGGBB")
                                .desired_width(90.0),
                        );
                        ui.end_row();

                        ui.label("Time");
                        match (&editor.draft.start_time, &editor.draft.end_time) {
                            (Some(start), Some(end)) => {
                                ui.horizontal(|ui| {
                                    ui.label(format!("{start}–{end}"));
                                    if ui.small_button("Clear").clicked() {
                                        pending = Some(EditorAction::ClearTime);
                                    }
                                });
                            }
                            _ => {
                                ui.weak("Untimed");
                            }
                        }
                        ui.end_row();
                    });

                let mut in_content = editor.draft.shows_in_content_calendar();
                if ui.checkbox(&mut in_content, "Show in content calendar").changed() {
                    editor.draft.is_content_calendar = in_content.then_some(true);
                }

                if let Some(error) = &editor.error {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        pending = Some(EditorAction::Save);
                    }
                    if ui.button("Cancel").clicked() {
                        pending = Some(EditorAction::Close);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🗑 Delete").clicked() {
                            pending = Some(EditorAction::Delete);
                        }
                        if !editor.draft.is_backlog() && ui.button("Move to backlog").clicked() {
                            pending = Some(EditorAction::MoveToBacklog);
                        }
                    });
                });
            });

        if !is_open && pending.is_none() {
            pending = Some(EditorAction::Close);
        }

        match pending {
            None => {}
            Some(EditorAction::ClearTime) => editor.draft.clear_time_range(),
            Some(EditorAction::Save) => match finish_edit(editor) {
                Ok(action) => {
                    self.state.item_editor = None;
                    self.dispatch(action);
                }
                Err(message) => editor.error = Some(message),
            },
            Some(EditorAction::MoveToBacklog) => {
                let id = editor.draft.id.clone();
                self.state.item_editor = None;
                self.dispatch(PlannerAction::MoveItem {
                    id,
                    date: None,
                    range: None,
                });
            }
            Some(EditorAction::Delete) => {
                let id = editor.draft.id.clone();
                self.state.item_editor = None;
                self.dispatch(PlannerAction::DeleteItem { id });
            }
            Some(EditorAction::Close) => self.state.item_editor = None,
        }
    }
}

/// Validate the draft and turn it into an update.
fn finish_edit(editor: &ItemEditorState) -> Result<PlannerAction, String> {
    let mut item = editor.draft.clone();

    item.text = item.text.trim().to_string();
    if item.text.is_empty() {
        return Err("Text cannot be empty".to_string());
    }

    let color = editor.color_input.trim();
    item.color = if color.is_empty() {
        None
    } else if is_valid_hex_color(color) {
        Some(color.to_string())
    } else {
        return Err(format!("'{color}' is not a #RGB or #RRGGBB color"));
    };

    if item.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
        item.description = None;
    }

    Ok(PlannerAction::UpdateItem(item))
}
