//! Dialog shown after a drag-to-create selection.
//!
//! Asks for a title and, when both tasks and content are displayed, whether
//! the selection becomes a task or a planned content card.

use super::super::state::{CreateDialogState, CreateKind};
use super::super::PlannerApp;
use crate::models::ui::DisplayMode;
use crate::services::planner::{NewItem, PlannerAction};
use crate::ui_egui::views::utils::format_range;

impl PlannerApp {
    pub(super) fn render_create_dialog(&mut self, ctx: &egui::Context) {
        let mode = self.display_mode;
        let Some(dialog) = self.state.create_dialog.as_mut() else {
            return;
        };

        let mut is_open = true;
        let mut submit = false;
        let mut cancel = false;

        egui::Window::new("New item")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut is_open)
            .show(ctx, |ui| {
                ui.label(format!(
                    "{}  {}",
                    dialog.request.date.format("%a %d %b"),
                    format_range(dialog.request.range.start_minutes, dialog.request.range.end_minutes)
                ));
                ui.add_space(6.0);

                let response = ui.add(
                    egui::TextEdit::singleline(&mut dialog.title)
                        .hint_text("Title")
                        .desired_width(260.0),
                );
                if ui.memory(|m| m.focused().is_none()) {
                    response.request_focus();
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }

                if mode == DisplayMode::Both {
                    ui.horizontal(|ui| {
                        ui.radio_value(&mut dialog.kind, CreateKind::Task, "Task");
                        ui.radio_value(&mut dialog.kind, CreateKind::Content, "Content card");
                    });
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Create").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if submit {
            match create_action(dialog, mode) {
                Some(action) => {
                    self.state.create_dialog = None;
                    self.dispatch(action);
                }
                None => log::debug!("Create dialog submitted without a title"),
            }
        } else if cancel || !is_open {
            self.state.create_dialog = None;
        }
    }
}

/// Action for a submitted dialog; `None` while the title is blank.
fn create_action(dialog: &CreateDialogState, mode: DisplayMode) -> Option<PlannerAction> {
    let title = dialog.title.trim();
    if title.is_empty() {
        return None;
    }

    let kind = match mode {
        DisplayMode::Both => dialog.kind,
        DisplayMode::Tasks | DisplayMode::Content => CreateKind::Task,
    };

    Some(match kind {
        CreateKind::Task => PlannerAction::CreateItem(NewItem {
            // Visible in the content view it was created from
            content_calendar: mode == DisplayMode::Content,
            ..NewItem::from_request(title, dialog.request)
        }),
        CreateKind::Content => PlannerAction::PlanContentCard {
            title: title.to_string(),
            date: dialog.request.date,
            range: Some(dialog.request.range),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::drag::{CreateRequest, TimeRange};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn dialog(title: &str, kind: CreateKind) -> CreateDialogState {
        CreateDialogState {
            request: CreateRequest {
                date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
                range: TimeRange::new(540, 600),
            },
            title: title.to_string(),
            kind,
        }
    }

    #[test]
    fn test_blank_title_creates_nothing() {
        assert_eq!(create_action(&dialog("   ", CreateKind::Task), DisplayMode::Tasks), None);
    }

    #[test]
    fn test_task_from_selection() {
        let action = create_action(&dialog(" Standup ", CreateKind::Task), DisplayMode::Tasks);
        let expected = NewItem::from_request("Standup", dialog("", CreateKind::Task).request);
        assert_eq!(action, Some(PlannerAction::CreateItem(expected)));
    }

    #[test]
    fn test_content_mode_flags_task() {
        let Some(PlannerAction::CreateItem(item)) =
            create_action(&dialog("Draft", CreateKind::Content), DisplayMode::Content)
        else {
            panic!("expected a task");
        };
        assert!(item.content_calendar);
    }

    #[test]
    fn test_both_mode_can_plan_content() {
        let action = create_action(&dialog("Video", CreateKind::Content), DisplayMode::Both);
        assert_eq!(
            action,
            Some(PlannerAction::PlanContentCard {
                title: "Video".into(),
                date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
                range: Some(TimeRange::new(540, 600)),
            })
        );
    }
}
