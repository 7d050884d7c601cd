// Planner day module
// Items scheduled on one date plus the legacy journal fields

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::planner_item::PlannerItem;

/// All planner data stored for a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub items: Vec<PlannerItem>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub top_priorities: String,
    #[serde(default)]
    pub reflection: String,
}

/// Which free-text journal field to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalField {
    Notes,
    TopPriorities,
    Reflection,
}

impl PlannerDay {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            items: Vec::new(),
            notes: String::new(),
            top_priorities: String::new(),
            reflection: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.notes.is_empty()
            && self.top_priorities.is_empty()
            && self.reflection.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&PlannerItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Items ordered by their manual `order` (unset last), stable otherwise.
    pub fn sorted_items(&self) -> Vec<&PlannerItem> {
        let mut items: Vec<&PlannerItem> = self.items.iter().collect();
        items.sort_by_key(|item| item.order.unwrap_or(i32::MAX));
        items
    }

    pub fn journal(&self, field: JournalField) -> &str {
        match field {
            JournalField::Notes => &self.notes,
            JournalField::TopPriorities => &self.top_priorities,
            JournalField::Reflection => &self.reflection,
        }
    }

    pub fn journal_mut(&mut self, field: JournalField) -> &mut String {
        match field {
            JournalField::Notes => &mut self.notes,
            JournalField::TopPriorities => &mut self.top_priorities,
            JournalField::Reflection => &mut self.reflection,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    #[test]
    fn test_sorted_items_puts_unordered_last() {
        let mut day = PlannerDay::new(date());
        let mut a = PlannerItem::new("a", "A", Some(date()));
        let b = PlannerItem::new("b", "B", Some(date()));
        let mut c = PlannerItem::new("c", "C", Some(date()));
        a.order = Some(2);
        c.order = Some(1);
        day.items = vec![a, b, c];

        let ids: Vec<_> = day.sorted_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_journal_fields() {
        let mut day = PlannerDay::new(date());
        assert!(day.is_empty());
        day.journal_mut(JournalField::Reflection).push_str("Good day");
        assert_eq!(day.journal(JournalField::Reflection), "Good day");
        assert!(!day.is_empty());
    }

    #[test]
    fn test_find_and_completed_count() {
        let mut day = PlannerDay::new(date());
        let mut done = PlannerItem::new("done", "Done", Some(date()));
        done.completed = true;
        day.items = vec![PlannerItem::new("open", "Open", Some(date())), done];

        assert_eq!(day.position("done"), Some(1));
        assert!(day.find("missing").is_none());
        assert_eq!(day.completed_count(), 1);
    }
}
