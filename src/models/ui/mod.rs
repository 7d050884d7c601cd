// UI models module
// View selection and display filters shared by the store and the egui views

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewType {
    #[default]
    Today,
    Week,
    Month,
}

impl ViewType {
    pub const ALL: [ViewType; 3] = [ViewType::Today, ViewType::Week, ViewType::Month];

    pub fn label(self) -> &'static str {
        match self {
            ViewType::Today => "Today",
            ViewType::Week => "Week",
            ViewType::Month => "Month",
        }
    }
}

/// Which sources appear on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Planner tasks only
    #[default]
    Tasks,
    /// Content cards plus tasks flagged for the content calendar
    Content,
    /// Everything; drag-to-create asks which kind to create
    Both,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Tasks, DisplayMode::Content, DisplayMode::Both];

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Tasks => "Tasks",
            DisplayMode::Content => "Content",
            DisplayMode::Both => "Tasks + Content",
        }
    }

    pub fn shows_content_cards(self) -> bool {
        matches!(self, DisplayMode::Content | DisplayMode::Both)
    }
}
