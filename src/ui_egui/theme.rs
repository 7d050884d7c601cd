//! Planner colors.
//!
//! Defines the PlannerTheme used by every view and applies its base colors
//! to the egui context.

use egui::Color32;

/// Colors used across the planner views.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,
    pub app_background: Color32,
    pub calendar_background: Color32,
    pub today_background: Color32,
    pub today_border: Color32,
    pub day_background: Color32,
    pub day_border: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    /// Fill for tasks without their own color
    pub task_block: Color32,
    /// Fill for content cards without their own color
    pub content_block: Color32,
    /// Current-time indicator
    pub now_line: Color32,
}

impl PlannerTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            calendar_background: Color32::from_rgb(255, 255, 255),
            today_background: Color32::from_rgb(230, 240, 255),
            today_border: Color32::from_rgb(100, 150, 255),
            day_background: Color32::from_rgb(255, 255, 255),
            day_border: Color32::from_rgb(220, 220, 220),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(100, 100, 100),
            task_block: Color32::from_rgb(120, 160, 230),
            content_block: Color32::from_rgb(230, 160, 90),
            now_line: Color32::from_rgb(255, 100, 100),
        }
    }

    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            calendar_background: Color32::from_rgb(40, 40, 40),
            today_background: Color32::from_rgb(50, 60, 80),
            today_border: Color32::from_rgb(100, 150, 255),
            day_background: Color32::from_rgb(40, 40, 40),
            day_border: Color32::from_rgb(60, 60, 60),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
            task_block: Color32::from_rgb(70, 105, 170),
            content_block: Color32::from_rgb(170, 110, 50),
            now_line: Color32::from_rgb(255, 100, 100),
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;

        visuals.widgets.noninteractive.bg_fill = self.day_background;
        visuals.widgets.inactive.bg_fill = self.day_background;
        visuals.widgets.hovered.bg_fill = self.today_background;
        visuals.widgets.active.bg_fill = self.today_background;

        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }
}
