use crate::ui_egui::theme::PlannerTheme;
use egui::Color32;

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub(crate) struct CalendarCellPalette {
    pub regular_bg: Color32,
    pub today_bg: Color32,
    pub outside_bg: Color32,
    pub border: Color32,
    pub today_border: Color32,
    pub text: Color32,
    pub muted_text: Color32,
    pub hover_border: Color32,
    pub task_dot: Color32,
    pub content_dot: Color32,
}

impl CalendarCellPalette {
    pub fn from_theme(theme: &PlannerTheme) -> Self {
        Self {
            regular_bg: theme.day_background,
            today_bg: theme.today_background,
            outside_bg: blend(theme.app_background, theme.calendar_background, 0.3),
            border: theme.day_border,
            today_border: theme.today_border,
            text: theme.text_primary,
            muted_text: theme.text_secondary,
            hover_border: with_alpha(theme.today_border, if theme.is_dark { 160 } else { 120 }),
            task_dot: theme.task_block,
            content_dot: theme.content_block,
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct DayStripPalette {
    pub strip_bg: Color32,
    pub strip_border: Color32,
    pub accent_line: Color32,
    pub text: Color32,
    pub date_text: Color32,
    pub badge_bg: Color32,
    pub badge_text: Color32,
}

impl DayStripPalette {
    pub fn from_theme(theme: &PlannerTheme) -> Self {
        Self {
            strip_bg: blend(theme.app_background, theme.calendar_background, 0.5),
            strip_border: theme.day_border,
            accent_line: theme.today_border,
            text: theme.text_primary,
            date_text: theme.text_secondary,
            badge_bg: theme.today_border,
            badge_text: if theme.is_dark {
                Color32::from_rgb(20, 20, 20)
            } else {
                Color32::from_rgb(245, 245, 245)
            },
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct TimeGridPalette {
    pub regular_bg: Color32,
    pub today_bg: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub label: Color32,
    pub task_fill: Color32,
    pub content_fill: Color32,
    pub block_border: Color32,
    pub active_border: Color32,
    pub block_text: Color32,
    pub preview_fill: Color32,
    pub now_line: Color32,
}

impl TimeGridPalette {
    pub fn from_theme(theme: &PlannerTheme) -> Self {
        Self {
            regular_bg: theme.day_background,
            today_bg: theme.today_background,
            hour_line: theme.day_border,
            slot_line: with_alpha(theme.day_border, 170),
            label: theme.text_secondary,
            task_fill: theme.task_block,
            content_fill: theme.content_block,
            block_border: with_alpha(theme.text_primary, 60),
            active_border: theme.today_border,
            block_text: if theme.is_dark {
                Color32::from_rgb(245, 245, 245)
            } else {
                Color32::from_rgb(20, 20, 20)
            },
            preview_fill: with_alpha(theme.today_border, if theme.is_dark { 90 } else { 70 }),
            now_line: theme.now_line,
        }
    }
}
