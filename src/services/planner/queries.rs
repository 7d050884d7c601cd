use chrono::NaiveDate;

use super::PlannerStore;
use crate::models::content_card::ContentBuckets;
use crate::models::ui::DisplayMode;
use crate::services::layout::{layout_day, DayLayout, LayoutSource};
use crate::services::storage::KeyValueStore;

/// Counts shown on a month grid cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub tasks: usize,
    pub completed: usize,
    pub content: usize,
}

impl DaySummary {
    pub fn is_empty(&self) -> bool {
        self.tasks == 0 && self.content == 0
    }
}

impl<S: KeyValueStore> PlannerStore<S> {
    /// Calendar sources for `date` under `mode`, tasks first in manual order.
    pub fn sources_for(&self, date: NaiveDate, mode: DisplayMode) -> Vec<LayoutSource<'_>> {
        let mut sources: Vec<LayoutSource<'_>> = self
            .day(date)
            .map(|day| day.sorted_items())
            .unwrap_or_default()
            .into_iter()
            .filter(|item| mode != DisplayMode::Content || item.shows_in_content_calendar())
            .map(LayoutSource::Task)
            .collect();

        if mode.shows_content_cards() {
            let buckets = ContentBuckets::for_date(&self.content_cards, date);
            sources.extend(buckets.iter().map(LayoutSource::Content));
        }

        sources
    }

    /// Lay out one day column.
    pub fn layout_for(&self, date: NaiveDate, mode: DisplayMode) -> DayLayout<'_> {
        layout_day(self.sources_for(date, mode))
    }

    pub fn summary_for(&self, date: NaiveDate, mode: DisplayMode) -> DaySummary {
        self.sources_for(date, mode)
            .into_iter()
            .fold(DaySummary::default(), |mut summary, source| {
                if source.is_task() {
                    summary.tasks += 1;
                    if source.is_completed() {
                        summary.completed += 1;
                    }
                } else {
                    summary.content += 1;
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content_card::ContentCard;
    use crate::services::drag::TimeRange;
    use crate::services::planner::{NewItem, PlannerAction};
    use crate::services::storage::{KeyValueStore, MemoryStore, CONTENT_KEY};
    use test_case::test_case;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()
    }

    fn seeded_store() -> PlannerStore<MemoryStore> {
        let mut scheduled = ContentCard::new("post", "Launch post");
        scheduled.scheduled_date = Some(date());
        scheduled.scheduled_start_time = Some("09:30".into());
        scheduled.scheduled_end_time = Some("10:00".into());
        let mut backend = MemoryStore::new();
        backend
            .set(CONTENT_KEY, &serde_json::to_string(&vec![scheduled]).unwrap())
            .unwrap();

        let mut store = PlannerStore::load(backend).unwrap();
        store
            .dispatch(PlannerAction::CreateItem(NewItem {
                range: Some(TimeRange::new(540, 600)),
                ..NewItem::untimed("Plain task", Some(date()))
            }))
            .unwrap();
        store
            .dispatch(PlannerAction::CreateItem(NewItem {
                content_calendar: true,
                ..NewItem::untimed("Script review", Some(date()))
            }))
            .unwrap();
        store
    }

    #[test_case(DisplayMode::Tasks, 2, 0 ; "tasks only")]
    #[test_case(DisplayMode::Content, 1, 1 ; "content and flagged tasks")]
    #[test_case(DisplayMode::Both, 2, 1 ; "everything")]
    fn test_display_mode_filters_sources(mode: DisplayMode, tasks: usize, content: usize) {
        let store = seeded_store();
        let summary = store.summary_for(date(), mode);
        assert_eq!(summary.tasks, tasks);
        assert_eq!(summary.content, content);
    }

    #[test]
    fn test_layout_for_overlapping_task_and_card() {
        let store = seeded_store();
        let layout = store.layout_for(date(), DisplayMode::Both);

        assert_eq!(layout.timed.len(), 2);
        assert_eq!(layout.untimed.len(), 1);
        let task = layout.timed.iter().find(|e| e.source.is_task()).unwrap();
        let card = layout.find("post").unwrap();
        assert!(task.is_background);
        assert!(!card.is_background);
        assert_eq!((card.column, card.total_columns), (0, 1));
    }

    #[test]
    fn test_empty_day_summary() {
        let store = PlannerStore::load(MemoryStore::new()).unwrap();
        assert!(store.summary_for(date(), DisplayMode::Both).is_empty());
        assert!(store.layout_for(date(), DisplayMode::Both).timed.is_empty());
    }

    #[test]
    fn test_completed_tasks_are_counted() {
        let mut store = seeded_store();
        let first = store.day(date()).unwrap().items[0].id.clone();
        store.dispatch(PlannerAction::ToggleComplete { id: first }).unwrap();
        assert_eq!(store.summary_for(date(), DisplayMode::Tasks).completed, 1);
    }
}
