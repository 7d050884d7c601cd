use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyValueStore;
use crate::models::content_card::ContentCard;
use crate::models::planner_day::PlannerDay;
use crate::models::planner_item::PlannerItem;
use crate::services::layout::geometry::Zoom;

pub const DAYS_KEY: &str = "planner_days";
pub const BACKLOG_KEY: &str = "planner_backlog";
pub const CONTENT_KEY: &str = "content_cards";
pub const ZOOM_KEY: &str = "planner_zoom";
pub const SCROLL_KEY: &str = "planner_scroll";

/// Zoom and scroll position persisted between sessions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ViewPrefs {
    pub zoom: Zoom,
    /// `None` until the user scrolls for the first time
    pub scroll_offset: Option<f32>,
}

/// Typed access to the planner's storage keys.
///
/// Missing keys read as empty defaults. Values that fail to deserialize are
/// logged and replaced by defaults so a corrupted entry never blocks startup.
pub struct PlannerRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PlannerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_days(&self) -> Result<BTreeMap<NaiveDate, PlannerDay>> {
        self.read_or_default(DAYS_KEY)
    }

    pub fn save_days(&mut self, days: &BTreeMap<NaiveDate, PlannerDay>) -> Result<()> {
        self.write(DAYS_KEY, days)
    }

    pub fn load_backlog(&self) -> Result<Vec<PlannerItem>> {
        self.read_or_default(BACKLOG_KEY)
    }

    /// An empty backlog drops its key instead of storing `[]`.
    pub fn save_backlog(&mut self, backlog: &[PlannerItem]) -> Result<()> {
        if backlog.is_empty() {
            return self
                .store
                .remove(BACKLOG_KEY)
                .with_context(|| format!("failed to clear '{}'", BACKLOG_KEY));
        }
        self.write(BACKLOG_KEY, backlog)
    }

    pub fn load_content_cards(&self) -> Result<Vec<ContentCard>> {
        self.read_or_default(CONTENT_KEY)
    }

    pub fn save_content_cards(&mut self, cards: &[ContentCard]) -> Result<()> {
        self.write(CONTENT_KEY, cards)
    }

    pub fn load_view_prefs(&self) -> Result<ViewPrefs> {
        let zoom: Option<f32> = self.read_or_default(ZOOM_KEY)?;
        let scroll_offset: Option<f32> = self.read_or_default(SCROLL_KEY)?;
        Ok(ViewPrefs {
            zoom: zoom.map(Zoom::new).unwrap_or_default(),
            scroll_offset: scroll_offset.filter(|offset| offset.is_finite() && *offset >= 0.0),
        })
    }

    pub fn save_zoom(&mut self, zoom: Zoom) -> Result<()> {
        self.write(ZOOM_KEY, &zoom.value())
    }

    pub fn save_scroll(&mut self, offset: f32) -> Result<()> {
        self.write(SCROLL_KEY, &offset)
    }

    fn read_or_default<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self
            .store
            .get(key)
            .with_context(|| format!("failed to load '{}'", key))?
        else {
            return Ok(T::default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                log::warn!("Ignoring unreadable '{}' entry: {}", key, err);
                Ok(T::default())
            }
        }
    }

    fn write<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize '{}'", key))?;
        self.store
            .set(key, &data)
            .with_context(|| format!("failed to save '{}'", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{MemoryStore, MockKeyValueStore};
    use mockall::predicate::eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()
    }

    #[test]
    fn test_missing_keys_read_as_defaults() {
        let repo = PlannerRepository::new(MemoryStore::new());
        assert!(repo.load_days().unwrap().is_empty());
        assert!(repo.load_backlog().unwrap().is_empty());
        assert!(repo.load_content_cards().unwrap().is_empty());
        assert_eq!(repo.load_view_prefs().unwrap(), ViewPrefs::default());
    }

    #[test]
    fn test_days_round_trip_keyed_by_iso_date() {
        let mut repo = PlannerRepository::new(MemoryStore::new());
        let mut day = PlannerDay::new(date());
        day.items.push(PlannerItem::new("a", "Plan", Some(date())));
        let days = BTreeMap::from([(date(), day)]);

        repo.save_days(&days).unwrap();

        let raw = repo.store().get(DAYS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"2025-08-04\""));
        assert_eq!(repo.load_days().unwrap(), days);
    }

    #[test]
    fn test_corrupted_value_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set(BACKLOG_KEY, "{not json").unwrap();
        let repo = PlannerRepository::new(store);
        assert!(repo.load_backlog().unwrap().is_empty());
    }

    #[test]
    fn test_view_prefs_clamp_zoom_and_reject_bad_scroll() {
        let mut store = MemoryStore::new();
        store.set(ZOOM_KEY, "4.0").unwrap();
        store.set(SCROLL_KEY, "-12.5").unwrap();
        let repo = PlannerRepository::new(store);

        let prefs = repo.load_view_prefs().unwrap();
        assert_eq!(prefs.zoom.value(), Zoom::MAX);
        assert_eq!(prefs.scroll_offset, None);
    }

    #[test]
    fn test_store_errors_propagate() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .with(eq(DAYS_KEY))
            .returning(|_| Err(anyhow::anyhow!("disk unavailable")));
        let repo = PlannerRepository::new(store);

        let err = repo.load_days().unwrap_err();
        assert!(err.to_string().contains("planner_days"));
    }

    #[test]
    fn test_save_zoom_writes_plain_number() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set()
            .with(eq(ZOOM_KEY), eq("1.2"))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut repo = PlannerRepository::new(store);
        repo.save_zoom(Zoom::new(1.2)).unwrap();
    }

    #[test]
    fn test_empty_backlog_removes_key() {
        let mut repo = PlannerRepository::new(MemoryStore::new());
        repo.save_backlog(&[PlannerItem::new("b", "Someday", None)]).unwrap();
        assert!(repo.store().get(BACKLOG_KEY).unwrap().is_some());

        repo.save_backlog(&[]).unwrap();
        assert_eq!(repo.store().get(BACKLOG_KEY).unwrap(), None);
        assert!(repo.load_backlog().unwrap().is_empty());
    }

    #[test]
    fn test_empty_backlog_never_writes() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_remove()
            .with(eq(BACKLOG_KEY))
            .times(1)
            .returning(|_| Ok(()));
        store.expect_set().never();
        let mut repo = PlannerRepository::new(store);
        repo.save_backlog(&[]).unwrap();
    }
}
