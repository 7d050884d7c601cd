// Settings module
// User configuration persisted as config.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ui::{DisplayMode, ViewType};

fn default_scroll_hour() -> u8 {
    7
}

/// Planner configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub default_view: ViewType,
    #[serde(default)]
    pub display_mode: DisplayMode,
    /// 0 = Sunday, 1 = Monday, etc.
    #[serde(default)]
    pub first_day_of_week: u8,
    /// Hour scrolled into view when no scroll position was saved
    #[serde(default = "default_scroll_hour")]
    pub initial_scroll_hour: u8,
    #[serde(default)]
    pub dark_mode: bool,
    /// Overrides the platform data directory for planner storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_view: ViewType::Today,
            display_mode: DisplayMode::Tasks,
            first_day_of_week: 0,
            initial_scroll_hour: default_scroll_hour(),
            dark_mode: false,
            data_dir: None,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.first_day_of_week > 6 {
            return Err("First day of week must be 0-6 (Sunday-Saturday)".to_string());
        }

        if self.initial_scroll_hour > 23 {
            return Err("Initial scroll hour must be 0-23".to_string());
        }

        Ok(())
    }
}
