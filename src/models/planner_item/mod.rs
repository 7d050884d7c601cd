// Planner item module
// A scheduled (or backlog) task shown in the Today/Week/Month views

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::time::{format_clock, parse_clock};

/// A planner task.
///
/// Field names serialize in camelCase so stored JSON stays compatible with
/// the planner's key-value storage format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerItem {
    pub id: String,
    /// Owning day; `None` keeps the item in the backlog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Also show this task in the content calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_content_calendar: Option<bool>,
    /// Manual sort position within its day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// Validation errors for PlannerItem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemValidationError {
    #[error("Item id cannot be empty")]
    EmptyId,
    #[error("Item text cannot be empty")]
    EmptyText,
    #[error("Color must be in hex format (#RRGGBB or #RGB)")]
    InvalidColor,
    #[error("Invalid {field} time '{value}' (expected HH:MM)")]
    InvalidTime { field: &'static str, value: String },
}

impl PlannerItem {
    /// Create a new untimed item for `date` (or the backlog when `None`).
    ///
    /// # Examples
    /// ```
    /// use daily_planner::models::planner_item::PlannerItem;
    ///
    /// let item = PlannerItem::new("task-1", "Write outline", None);
    /// assert!(!item.is_timed());
    /// ```
    pub fn new(id: impl Into<String>, text: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            id: id.into(),
            date,
            text: text.into(),
            completed: false,
            start_time: None,
            end_time: None,
            color: None,
            description: None,
            is_content_calendar: None,
            order: None,
        }
    }

    /// Create a builder for constructing items with optional fields
    pub fn builder() -> PlannerItemBuilder {
        PlannerItemBuilder::new()
    }

    /// Validate the item
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.trim().is_empty() {
            return Err(ItemValidationError::EmptyId);
        }

        if self.text.trim().is_empty() {
            return Err(ItemValidationError::EmptyText);
        }

        if let Some(ref color) = self.color {
            if !is_valid_hex_color(color) {
                return Err(ItemValidationError::InvalidColor);
            }
        }

        for (field, value) in [("start", &self.start_time), ("end", &self.end_time)] {
            if let Some(value) = value {
                if parse_clock(value).is_err() {
                    return Err(ItemValidationError::InvalidTime {
                        field,
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Both clock times are present, so the item may take part in timed layout.
    pub fn is_timed(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }

    pub fn is_backlog(&self) -> bool {
        self.date.is_none()
    }

    pub fn shows_in_content_calendar(&self) -> bool {
        self.is_content_calendar.unwrap_or(false)
    }

    /// Replace both clock times from minute-of-day values.
    pub fn set_time_range(&mut self, start_minutes: i32, end_minutes: i32) {
        self.start_time = Some(format_clock(start_minutes));
        self.end_time = Some(format_clock(end_minutes));
    }

    pub fn clear_time_range(&mut self) {
        self.start_time = None;
        self.end_time = None;
    }
}

/// Check if a string is a valid hex color code.
pub fn is_valid_hex_color(color: &str) -> bool {
    let color = color.trim();
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Builder for creating items with optional fields
pub struct PlannerItemBuilder {
    id: Option<String>,
    date: Option<NaiveDate>,
    text: Option<String>,
    completed: bool,
    start_time: Option<String>,
    end_time: Option<String>,
    color: Option<String>,
    description: Option<String>,
    is_content_calendar: Option<bool>,
    order: Option<i32>,
}

impl PlannerItemBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            date: None,
            text: None,
            completed: false,
            start_time: None,
            end_time: None,
            color: None,
            description: None,
            is_content_calendar: None,
            order: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Set the start and end clock times (`HH:MM`)
    pub fn times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self.end_time = Some(end.into());
        self
    }

    pub fn start_time(mut self, start: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self
    }

    pub fn end_time(mut self, end: impl Into<String>) -> Self {
        self.end_time = Some(end.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn content_calendar(mut self, included: bool) -> Self {
        self.is_content_calendar = Some(included);
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Build the item, generating an id when none was given
    pub fn build(self) -> Result<PlannerItem, ItemValidationError> {
        let text = self.text.ok_or(ItemValidationError::EmptyText)?;
        let item = PlannerItem {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            date: self.date,
            text,
            completed: self.completed,
            start_time: self.start_time,
            end_time: self.end_time,
            color: self.color,
            description: self.description,
            is_content_calendar: self.is_content_calendar,
            order: self.order,
        };

        item.validate()?;
        Ok(item)
    }
}

impl Default for PlannerItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}
