//! Content card model.
//!
//! Content cards belong to the content-production pipeline. The planner only
//! reads them: a card is either *scheduled* (posting-ready, has a scheduled
//! date) or *planned* (idea stage, placed with planned date/times).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A content-production item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCard {
    pub id: String,
    /// Title or hook shown on the calendar
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Which pipeline stage a card's calendar slot comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentStage {
    Scheduled,
    Planned,
}

/// The effective calendar placement of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSlot<'a> {
    pub stage: ContentStage,
    pub date: Option<NaiveDate>,
    pub start_time: Option<&'a str>,
    pub end_time: Option<&'a str>,
}

impl ContentCard {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            hook: None,
            scheduled_date: None,
            scheduled_start_time: None,
            scheduled_end_time: None,
            planned_date: None,
            planned_start_time: None,
            planned_end_time: None,
            color: None,
            completed: None,
        }
    }

    /// A card is planned until it gets a scheduled date.
    pub fn is_planned(&self) -> bool {
        self.scheduled_date.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.completed.unwrap_or(false)
    }

    pub fn stage(&self) -> ContentStage {
        if self.is_planned() {
            ContentStage::Planned
        } else {
            ContentStage::Scheduled
        }
    }

    /// Date and times for the card's current stage.
    pub fn slot(&self) -> ContentSlot<'_> {
        match self.stage() {
            ContentStage::Scheduled => ContentSlot {
                stage: ContentStage::Scheduled,
                date: self.scheduled_date,
                start_time: self.scheduled_start_time.as_deref(),
                end_time: self.scheduled_end_time.as_deref(),
            },
            ContentStage::Planned => ContentSlot {
                stage: ContentStage::Planned,
                date: self.planned_date,
                start_time: self.planned_start_time.as_deref(),
                end_time: self.planned_end_time.as_deref(),
            },
        }
    }

    /// Text shown on calendar chips: the hook when present, else the title.
    pub fn display_title(&self) -> &str {
        self.hook
            .as_deref()
            .filter(|hook| !hook.trim().is_empty())
            .unwrap_or(&self.title)
    }
}

/// A day's content cards split by stage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContentBuckets<'a> {
    pub scheduled: Vec<&'a ContentCard>,
    pub planned: Vec<&'a ContentCard>,
}

impl<'a> ContentBuckets<'a> {
    /// Collect the cards whose effective date is `date`, keeping input order.
    pub fn for_date(cards: &'a [ContentCard], date: NaiveDate) -> Self {
        let mut buckets = Self::default();
        for card in cards {
            let slot = card.slot();
            if slot.date != Some(date) {
                continue;
            }
            match slot.stage {
                ContentStage::Scheduled => buckets.scheduled.push(card),
                ContentStage::Planned => buckets.planned.push(card),
            }
        }
        buckets
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty() && self.planned.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scheduled.len() + self.planned.len()
    }

    /// Scheduled cards first, then planned ones.
    pub fn iter(&self) -> impl Iterator<Item = &'a ContentCard> + '_ {
        self.scheduled.iter().chain(self.planned.iter()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn scheduled(id: &str, date: NaiveDate) -> ContentCard {
        let mut card = ContentCard::new(id, format!("Post {id}"));
        card.scheduled_date = Some(date);
        card.scheduled_start_time = Some("18:00".into());
        card.scheduled_end_time = Some("18:30".into());
        card
    }

    fn planned(id: &str, date: NaiveDate) -> ContentCard {
        let mut card = ContentCard::new(id, format!("Idea {id}"));
        card.planned_date = Some(date);
        card.planned_start_time = Some("10:00".into());
        card.planned_end_time = Some("11:00".into());
        card
    }

    #[test]
    fn test_card_without_scheduled_date_is_planned() {
        let card = planned("a", day(1));
        assert!(card.is_planned());
        assert_eq!(card.stage(), ContentStage::Planned);
        assert_eq!(card.slot().start_time, Some("10:00"));
    }

    #[test]
    fn test_scheduled_slot_wins_over_planned_fields() {
        let mut card = scheduled("a", day(2));
        card.planned_date = Some(day(1));
        let slot = card.slot();
        assert_eq!(slot.stage, ContentStage::Scheduled);
        assert_eq!(slot.date, Some(day(2)));
        assert_eq!(slot.end_time, Some("18:30"));
    }

    #[test]
    fn test_buckets_split_by_stage_and_date() {
        let cards = vec![
            scheduled("s1", day(3)),
            planned("p1", day(3)),
            planned("p2", day(4)),
            scheduled("s2", day(3)),
        ];

        let buckets = ContentBuckets::for_date(&cards, day(3));
        let scheduled_ids: Vec<_> = buckets.scheduled.iter().map(|c| c.id.as_str()).collect();
        let planned_ids: Vec<_> = buckets.planned.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(scheduled_ids, vec!["s1", "s2"]);
        assert_eq!(planned_ids, vec!["p1"]);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets.iter().count(), 3);
    }

    #[test]
    fn test_display_title_prefers_hook() {
        let mut card = ContentCard::new("a", "Long working title");
        assert_eq!(card.display_title(), "Long working title");
        card.hook = Some("Stop scrolling!".into());
        assert_eq!(card.display_title(), "Stop scrolling!");
    }
}
