use anyhow::{Context, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use super::PlannerStore;
use crate::models::content_card::ContentCard;
use crate::models::planner_day::{JournalField, PlannerDay};
use crate::models::planner_item::PlannerItem;
use crate::services::drag::{CommitChange, CreateRequest, ItemCommit, TimeRange};
use crate::services::layout::geometry::Zoom;
use crate::services::storage::KeyValueStore;
use crate::utils::time::format_clock;

/// Fields for a new planner item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub text: String,
    pub date: Option<NaiveDate>,
    pub range: Option<TimeRange>,
    pub color: Option<String>,
    pub content_calendar: bool,
}

impl NewItem {
    pub fn untimed(text: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            text: text.into(),
            date,
            range: None,
            color: None,
            content_calendar: false,
        }
    }

    /// Item for a finished drag-to-create selection.
    pub fn from_request(text: impl Into<String>, request: CreateRequest) -> Self {
        Self {
            range: Some(request.range),
            ..Self::untimed(text, Some(request.date))
        }
    }
}

/// Every state change the planner supports.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerAction {
    CreateItem(NewItem),
    /// Replace an item wholesale, relocating it if its date changed
    UpdateItem(PlannerItem),
    ResizeItem { id: String, change: CommitChange },
    /// Move to another day (or the backlog with `None`), optionally retimed
    MoveItem {
        id: String,
        date: Option<NaiveDate>,
        range: Option<TimeRange>,
    },
    ToggleComplete { id: String },
    DeleteItem { id: String },
    /// Assign `order` by position in `ids`
    ReorderItems { date: NaiveDate, ids: Vec<String> },
    SetDayNotes {
        date: NaiveDate,
        field: JournalField,
        text: String,
    },
    /// Put a new idea-stage content card on the calendar
    PlanContentCard {
        title: String,
        date: NaiveDate,
        range: Option<TimeRange>,
    },
    SetZoom(Zoom),
    SetScroll(f32),
}

impl From<ItemCommit> for PlannerAction {
    fn from(commit: ItemCommit) -> Self {
        match commit.change {
            CommitChange::Range(range) => PlannerAction::MoveItem {
                id: commit.item_id,
                date: Some(commit.date),
                range: Some(range),
            },
            change => PlannerAction::ResizeItem {
                id: commit.item_id,
                change,
            },
        }
    }
}

impl<S: KeyValueStore> PlannerStore<S> {
    /// Apply one action and write the touched keys through to storage.
    ///
    /// Actions naming an unknown item are logged and ignored.
    pub fn dispatch(&mut self, action: PlannerAction) -> Result<()> {
        log::debug!("Dispatching {:?}", action);
        match action {
            PlannerAction::CreateItem(new_item) => self.create_item(new_item).map(|_| ()),
            PlannerAction::UpdateItem(item) => self.update_item(item),
            PlannerAction::ResizeItem { id, change } => self.edit_item(&id, |item| match change {
                CommitChange::Start(minutes) => item.start_time = Some(format_clock(minutes)),
                CommitChange::End(minutes) => item.end_time = Some(format_clock(minutes)),
                CommitChange::Range(range) => {
                    item.set_time_range(range.start_minutes, range.end_minutes)
                }
            }),
            PlannerAction::MoveItem { id, date, range } => self.edit_item(&id, |item| {
                item.date = date;
                match (date, range) {
                    (None, _) => item.clear_time_range(),
                    (Some(_), Some(range)) => {
                        item.set_time_range(range.start_minutes, range.end_minutes)
                    }
                    (Some(_), None) => {}
                }
            }),
            PlannerAction::ToggleComplete { id } => {
                self.edit_item(&id, |item| item.completed = !item.completed)
            }
            PlannerAction::DeleteItem { id } => {
                if self.take_item(&id).is_none() {
                    log::warn!("Delete ignored, no item with id {}", id);
                    return Ok(());
                }
                self.persist_items()
            }
            PlannerAction::ReorderItems { date, ids } => self.reorder_items(date, &ids),
            PlannerAction::SetDayNotes { date, field, text } => {
                let day = self.days.entry(date).or_insert_with(|| PlannerDay::new(date));
                *day.journal_mut(field) = text;
                if day.is_empty() {
                    self.days.remove(&date);
                }
                self.repo.save_days(&self.days)
            }
            PlannerAction::PlanContentCard { title, date, range } => {
                self.plan_content_card(title, date, range)
            }
            PlannerAction::SetZoom(zoom) => {
                self.prefs.zoom = zoom;
                self.repo.save_zoom(zoom)
            }
            PlannerAction::SetScroll(offset) => {
                if !offset.is_finite() || offset < 0.0 {
                    log::warn!("Ignoring invalid scroll offset {}", offset);
                    return Ok(());
                }
                self.prefs.scroll_offset = Some(offset);
                self.repo.save_scroll(offset)
            }
        }
    }

    /// Create an item and return its generated id.
    pub fn create_item(&mut self, new_item: NewItem) -> Result<String> {
        let mut builder = PlannerItem::builder()
            .text(new_item.text)
            .order(self.next_order(new_item.date));
        if new_item.content_calendar {
            builder = builder.content_calendar(true);
        }
        if let Some(date) = new_item.date {
            builder = builder.date(date);
        }
        if let Some(range) = new_item.range {
            builder = builder.times(range.start_clock(), range.end_clock());
        }
        if let Some(color) = new_item.color {
            builder = builder.color(color);
        }

        let item = builder.build().context("Invalid planner item")?;
        let id = item.id.clone();
        log::info!("Created item {} on {:?}", id, item.date);
        self.place_item(item);
        self.persist_items()?;
        Ok(id)
    }

    fn update_item(&mut self, item: PlannerItem) -> Result<()> {
        item.validate().context("Invalid planner item")?;
        if !self.replace_item(item) {
            log::warn!("Update ignored, item no longer exists");
            return Ok(());
        }
        self.persist_items()
    }

    /// Clone, edit and swap back in a single replace.
    fn edit_item<F>(&mut self, id: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut PlannerItem),
    {
        let Some(mut item) = self.find_item(id).cloned() else {
            log::warn!("Ignoring edit of unknown item {}", id);
            return Ok(());
        };
        edit(&mut item);
        self.replace_item(item);
        self.persist_items()
    }

    fn reorder_items(&mut self, date: NaiveDate, ids: &[String]) -> Result<()> {
        let Some(day) = self.days.get_mut(&date) else {
            log::warn!("Reorder ignored, nothing planned on {}", date);
            return Ok(());
        };
        for item in &mut day.items {
            if let Some(position) = ids.iter().position(|id| *id == item.id) {
                item.order = Some(position as i32);
            }
        }
        self.repo.save_days(&self.days)
    }

    fn plan_content_card(
        &mut self,
        title: String,
        date: NaiveDate,
        range: Option<TimeRange>,
    ) -> Result<()> {
        if title.trim().is_empty() {
            anyhow::bail!("Content card title cannot be empty");
        }
        let mut card = ContentCard::new(Uuid::new_v4().to_string(), title);
        card.planned_date = Some(date);
        if let Some(range) = range {
            card.planned_start_time = Some(range.start_clock());
            card.planned_end_time = Some(range.end_clock());
        }
        log::info!("Planned content card {} on {}", card.id, date);
        self.content_cards.push(card);
        self.repo.save_content_cards(&self.content_cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{MemoryStore, MockKeyValueStore};
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 2).unwrap()
    }

    fn empty_store() -> PlannerStore<MemoryStore> {
        PlannerStore::load(MemoryStore::new()).unwrap()
    }

    fn timed(store: &mut PlannerStore<MemoryStore>, text: &str, start: i32, end: i32) -> String {
        store
            .create_item(NewItem {
                range: Some(TimeRange::new(start, end)),
                ..NewItem::untimed(text, Some(date()))
            })
            .unwrap()
    }

    #[test]
    fn test_create_item_persists_day() {
        let mut store = empty_store();
        let id = timed(&mut store, "Film intro", 540, 600);

        let item = store.find_item(&id).unwrap();
        assert_eq!(item.start_time.as_deref(), Some("09:00"));
        assert_eq!(item.end_time.as_deref(), Some("10:00"));
        assert_eq!(item.order, Some(0));

        let reloaded = PlannerStore::load(store.repository().store().clone()).unwrap();
        assert!(reloaded.find_item(&id).is_some());
    }

    #[test]
    fn test_create_rejects_empty_text() {
        let mut store = empty_store();
        assert!(store.dispatch(PlannerAction::CreateItem(NewItem::untimed("  ", None))).is_err());
        assert!(store.backlog().is_empty());
    }

    #[test]
    fn test_resize_commit_updates_end_only() {
        let mut store = empty_store();
        let id = timed(&mut store, "Edit", 780, 840);
        let commit = ItemCommit {
            item_id: id.clone(),
            date: date(),
            change: CommitChange::End(870),
        };

        store.dispatch(commit.into()).unwrap();

        let item = store.find_item(&id).unwrap();
        assert_eq!(item.start_time.as_deref(), Some("13:00"));
        assert_eq!(item.end_time.as_deref(), Some("14:30"));
    }

    #[test]
    fn test_move_commit_changes_day() {
        let mut store = empty_store();
        let id = timed(&mut store, "Record", 600, 660);
        let next_day = date().succ_opt().unwrap();
        let commit = ItemCommit {
            item_id: id.clone(),
            date: next_day,
            change: CommitChange::Range(TimeRange::new(720, 780)),
        };

        store.dispatch(commit.into()).unwrap();

        assert!(store.day(date()).is_none());
        let moved = store.day(next_day).unwrap().find(&id).unwrap();
        assert_eq!(moved.date, Some(next_day));
        assert_eq!(moved.start_time.as_deref(), Some("12:00"));
    }

    #[test]
    fn test_move_to_backlog_clears_times() {
        let mut store = empty_store();
        let id = timed(&mut store, "Later", 600, 660);
        store
            .dispatch(PlannerAction::MoveItem {
                id: id.clone(),
                date: None,
                range: None,
            })
            .unwrap();

        let item = &store.backlog()[0];
        assert_eq!(item.id, id);
        assert!(!item.is_timed());
    }

    #[test]
    fn test_revert_restores_original_day() {
        let mut store = empty_store();
        let id = timed(&mut store, "Call", 600, 660);
        let original = store.find_item(&id).unwrap().clone();
        store
            .dispatch(PlannerAction::MoveItem {
                id: id.clone(),
                date: date().succ_opt(),
                range: Some(TimeRange::new(0, 60)),
            })
            .unwrap();

        store.dispatch(PlannerAction::UpdateItem(original.clone())).unwrap();

        assert_eq!(store.day(date()).unwrap().items, vec![original]);
        assert_eq!(store.days().len(), 1);
    }

    #[test]
    fn test_toggle_and_delete() {
        let mut store = empty_store();
        let id = store.create_item(NewItem::untimed("Inbox zero", Some(date()))).unwrap();

        store.dispatch(PlannerAction::ToggleComplete { id: id.clone() }).unwrap();
        assert!(store.find_item(&id).unwrap().completed);

        store.dispatch(PlannerAction::DeleteItem { id: id.clone() }).unwrap();
        assert!(store.find_item(&id).is_none());
        assert!(store.days().is_empty());
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut store = empty_store();
        assert!(store.dispatch(PlannerAction::ToggleComplete { id: "nope".into() }).is_ok());
        assert!(store.dispatch(PlannerAction::DeleteItem { id: "nope".into() }).is_ok());
        assert!(store
            .dispatch(PlannerAction::ResizeItem {
                id: "nope".into(),
                change: CommitChange::Start(60),
            })
            .is_ok());
    }

    #[test]
    fn test_reorder_assigns_positions() {
        let mut store = empty_store();
        let first = store.create_item(NewItem::untimed("First", Some(date()))).unwrap();
        let second = store.create_item(NewItem::untimed("Second", Some(date()))).unwrap();

        store
            .dispatch(PlannerAction::ReorderItems {
                date: date(),
                ids: vec![second.clone(), first.clone()],
            })
            .unwrap();

        let sorted: Vec<&str> = store
            .day(date())
            .unwrap()
            .sorted_items()
            .into_iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(sorted, vec![second.as_str(), first.as_str()]);
    }

    #[test]
    fn test_day_notes_create_and_clear_day() {
        let mut store = empty_store();
        store
            .dispatch(PlannerAction::SetDayNotes {
                date: date(),
                field: JournalField::TopPriorities,
                text: "Ship it".into(),
            })
            .unwrap();
        assert_eq!(store.day(date()).unwrap().top_priorities, "Ship it");

        store
            .dispatch(PlannerAction::SetDayNotes {
                date: date(),
                field: JournalField::TopPriorities,
                text: String::new(),
            })
            .unwrap();
        assert!(store.day(date()).is_none());
    }

    #[test]
    fn test_plan_content_card() {
        let mut store = empty_store();
        store
            .dispatch(PlannerAction::PlanContentCard {
                title: "Teaser".into(),
                date: date(),
                range: Some(TimeRange::new(900, 960)),
            })
            .unwrap();

        let card = &store.content_cards()[0];
        assert!(card.is_planned());
        assert_eq!(card.planned_date, Some(date()));
        assert_eq!(card.planned_start_time.as_deref(), Some("15:00"));
    }

    #[test]
    fn test_zoom_and_scroll_persist() {
        let mut store = empty_store();
        store.dispatch(PlannerAction::SetZoom(Zoom::new(1.2))).unwrap();
        store.dispatch(PlannerAction::SetScroll(420.0)).unwrap();
        store.dispatch(PlannerAction::SetScroll(f32::NAN)).unwrap();

        let reloaded = PlannerStore::load(store.repository().store().clone()).unwrap();
        assert_eq!(reloaded.zoom(), Zoom::new(1.2));
        assert_eq!(reloaded.scroll_offset(), Some(420.0));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut backend = MockKeyValueStore::new();
        backend.expect_get().returning(|_| Ok(None));
        backend
            .expect_set()
            .returning(|_, _| Err(anyhow::anyhow!("disk full")));
        let mut store = PlannerStore::load(backend).unwrap();

        let err = store
            .dispatch(PlannerAction::CreateItem(NewItem::untimed("Draft", Some(date()))))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("disk full"));
    }
}
