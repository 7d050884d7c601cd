//! Planner state and its reducer.
//!
//! [`PlannerStore`] owns every collection the views read: dated days, the
//! backlog, content cards and the persisted zoom/scroll. All mutations go
//! through [`PlannerStore::dispatch`]; each one replaces the touched item in
//! its collection and writes the affected storage keys straight through.

mod actions;
mod queries;

pub use self::actions::{NewItem, PlannerAction};
pub use self::queries::DaySummary;

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::content_card::ContentCard;
use crate::models::planner_day::PlannerDay;
use crate::models::planner_item::PlannerItem;
use crate::services::layout::geometry::Zoom;
use crate::services::storage::{KeyValueStore, PlannerRepository, ViewPrefs};

/// Where an item currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemLocation {
    Day(NaiveDate, usize),
    Backlog(usize),
}

pub struct PlannerStore<S: KeyValueStore> {
    repo: PlannerRepository<S>,
    days: BTreeMap<NaiveDate, PlannerDay>,
    backlog: Vec<PlannerItem>,
    content_cards: Vec<ContentCard>,
    prefs: ViewPrefs,
}

impl<S: KeyValueStore> PlannerStore<S> {
    /// Load every collection from `store`.
    pub fn load(store: S) -> Result<Self> {
        let repo = PlannerRepository::new(store);
        let days = repo.load_days()?;
        let backlog = repo.load_backlog()?;
        let content_cards = repo.load_content_cards()?;
        let prefs = repo.load_view_prefs()?;

        log::info!(
            "Loaded planner: {} days, {} backlog items, {} content cards",
            days.len(),
            backlog.len(),
            content_cards.len()
        );

        Ok(Self {
            repo,
            days,
            backlog,
            content_cards,
            prefs,
        })
    }

    /// Store with no data, for when loading failed.
    pub fn empty(store: S) -> Self {
        Self {
            repo: PlannerRepository::new(store),
            days: BTreeMap::new(),
            backlog: Vec::new(),
            content_cards: Vec::new(),
            prefs: ViewPrefs::default(),
        }
    }

    pub fn repository(&self) -> &PlannerRepository<S> {
        &self.repo
    }

    pub fn day(&self, date: NaiveDate) -> Option<&PlannerDay> {
        self.days.get(&date)
    }

    pub fn days(&self) -> &BTreeMap<NaiveDate, PlannerDay> {
        &self.days
    }

    pub fn backlog(&self) -> &[PlannerItem] {
        &self.backlog
    }

    pub fn content_cards(&self) -> &[ContentCard] {
        &self.content_cards
    }

    pub fn zoom(&self) -> Zoom {
        self.prefs.zoom
    }

    pub fn scroll_offset(&self) -> Option<f32> {
        self.prefs.scroll_offset
    }

    /// Look an item up by id across all days and the backlog.
    pub fn find_item(&self, id: &str) -> Option<&PlannerItem> {
        match self.locate(id)? {
            ItemLocation::Day(date, index) => self.days.get(&date).map(|day| &day.items[index]),
            ItemLocation::Backlog(index) => self.backlog.get(index),
        }
    }

    fn locate(&self, id: &str) -> Option<ItemLocation> {
        for (date, day) in &self.days {
            if let Some(index) = day.position(id) {
                return Some(ItemLocation::Day(*date, index));
            }
        }
        self.backlog
            .iter()
            .position(|item| item.id == id)
            .map(ItemLocation::Backlog)
    }

    /// Remove an item from wherever it lives. Days left empty are dropped.
    fn take_item(&mut self, id: &str) -> Option<PlannerItem> {
        match self.locate(id)? {
            ItemLocation::Day(date, index) => {
                let day = self.days.get_mut(&date)?;
                let item = day.items.remove(index);
                if day.is_empty() {
                    self.days.remove(&date);
                }
                Some(item)
            }
            ItemLocation::Backlog(index) => Some(self.backlog.remove(index)),
        }
    }

    /// Append an item to the collection its `date` points at.
    fn place_item(&mut self, item: PlannerItem) {
        match item.date {
            Some(date) => self
                .days
                .entry(date)
                .or_insert_with(|| PlannerDay::new(date))
                .items
                .push(item),
            None => self.backlog.push(item),
        }
    }

    /// Swap in a new version of an existing item.
    ///
    /// Replaces in place when the item stays in the same collection,
    /// otherwise relocates it. Returns `false` when the id is unknown.
    fn replace_item(&mut self, item: PlannerItem) -> bool {
        match self.locate(&item.id) {
            Some(ItemLocation::Day(date, index)) if item.date == Some(date) => {
                if let Some(day) = self.days.get_mut(&date) {
                    day.items[index] = item;
                }
                true
            }
            Some(ItemLocation::Backlog(index)) if item.date.is_none() => {
                self.backlog[index] = item;
                true
            }
            Some(_) => {
                self.take_item(&item.id);
                self.place_item(item);
                true
            }
            None => false,
        }
    }

    fn next_order(&self, date: Option<NaiveDate>) -> i32 {
        let items: &[PlannerItem] = match date {
            Some(date) => self.days.get(&date).map(|day| day.items.as_slice()).unwrap_or(&[]),
            None => &self.backlog,
        };
        items
            .iter()
            .filter_map(|item| item.order)
            .max()
            .map(|max| max + 1)
            .unwrap_or(items.len() as i32)
    }

    fn persist_items(&mut self) -> Result<()> {
        self.repo.save_days(&self.days)?;
        self.repo.save_backlog(&self.backlog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStore;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    fn store_with(items: Vec<PlannerItem>) -> PlannerStore<MemoryStore> {
        let mut store = PlannerStore::load(MemoryStore::new()).unwrap();
        for item in items {
            store.place_item(item);
        }
        store
    }

    #[test]
    fn test_load_empty_store() {
        let store = PlannerStore::load(MemoryStore::new()).unwrap();
        assert!(store.days().is_empty());
        assert!(store.backlog().is_empty());
        assert_eq!(store.zoom(), Zoom::default());
        assert_eq!(store.scroll_offset(), None);
    }

    #[test]
    fn test_find_item_across_days_and_backlog() {
        let store = store_with(vec![
            PlannerItem::new("dated", "Dated", Some(date())),
            PlannerItem::new("loose", "Loose", None),
        ]);
        assert_eq!(store.find_item("dated").map(|i| i.text.as_str()), Some("Dated"));
        assert_eq!(store.find_item("loose").map(|i| i.text.as_str()), Some("Loose"));
        assert!(store.find_item("missing").is_none());
    }

    #[test]
    fn test_replace_in_place_keeps_position() {
        let mut store = store_with(vec![
            PlannerItem::new("a", "A", Some(date())),
            PlannerItem::new("b", "B", Some(date())),
        ]);
        let mut edited = PlannerItem::new("a", "A edited", Some(date()));
        edited.completed = true;

        assert!(store.replace_item(edited));
        let day = store.day(date()).unwrap();
        assert_eq!(day.items[0].text, "A edited");
        assert_eq!(day.items[1].id, "b");
    }

    #[test]
    fn test_replace_relocates_and_drops_empty_day() {
        let mut store = store_with(vec![PlannerItem::new("a", "A", Some(date()))]);
        assert!(store.replace_item(PlannerItem::new("a", "A", None)));
        assert!(store.day(date()).is_none());
        assert_eq!(store.backlog().len(), 1);
    }

    #[test]
    fn test_replace_unknown_id_is_rejected() {
        let mut store = store_with(vec![]);
        assert!(!store.replace_item(PlannerItem::new("ghost", "Ghost", None)));
        assert!(store.backlog().is_empty());
    }

    #[test]
    fn test_next_order_follows_highest() {
        let mut ordered = PlannerItem::new("a", "A", Some(date()));
        ordered.order = Some(4);
        let store = store_with(vec![ordered, PlannerItem::new("b", "B", Some(date()))]);
        assert_eq!(store.next_order(Some(date())), 5);
        assert_eq!(store.next_order(None), 0);
    }
}
