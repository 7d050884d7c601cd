// Test fixtures - reusable test data
// Provides consistent planner items and stores across all test files

#![allow(dead_code)]

use chrono::NaiveDate;
use daily_planner::models::content_card::ContentCard;
use daily_planner::models::planner_item::PlannerItem;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, March 3, 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    /// Tuesday, March 4, 2025
    pub fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }
}

/// Sample planner items for testing
pub mod items {
    use super::*;

    /// A timed task on `date`
    pub fn timed(id: &str, date: NaiveDate, start: &str, end: &str) -> PlannerItem {
        PlannerItem::builder()
            .id(id)
            .text(format!("Task {id}"))
            .date(date)
            .times(start, end)
            .build()
            .unwrap()
    }

    /// A task without times on `date`
    pub fn untimed(id: &str, date: NaiveDate) -> PlannerItem {
        PlannerItem::builder()
            .id(id)
            .text(format!("Task {id}"))
            .date(date)
            .build()
            .unwrap()
    }

    /// The three-item group used across layout tests:
    /// A 09:00-12:00, B 09:30-10:30, C 10:00-11:00
    pub fn abc_group(date: NaiveDate) -> Vec<PlannerItem> {
        vec![
            timed("A", date, "09:00", "12:00"),
            timed("B", date, "09:30", "10:30"),
            timed("C", date, "10:00", "11:00"),
        ]
    }
}

/// Sample content cards for testing
pub mod cards {
    use super::*;

    /// An idea-stage card planned on `date`
    pub fn planned(id: &str, date: NaiveDate, start: &str, end: &str) -> ContentCard {
        let mut card = ContentCard::new(id, format!("Card {id}"));
        card.planned_date = Some(date);
        card.planned_start_time = Some(start.to_string());
        card.planned_end_time = Some(end.to_string());
        card
    }
}

/// Write items and cards straight to storage, as a previous session would have
pub mod seed {
    use super::*;
    use daily_planner::models::planner_day::PlannerDay;
    use daily_planner::services::storage::{FileStore, PlannerRepository};
    use std::collections::BTreeMap;
    use std::path::Path;

    pub fn files(dir: &Path, items: Vec<PlannerItem>, cards: Vec<ContentCard>) {
        let mut days: BTreeMap<NaiveDate, PlannerDay> = BTreeMap::new();
        for item in items {
            let date = item.date.expect("seeded items need a date");
            days.entry(date)
                .or_insert_with(|| PlannerDay::new(date))
                .items
                .push(item);
        }

        let mut repo = PlannerRepository::new(FileStore::new(dir));
        repo.save_days(&days).unwrap();
        repo.save_content_cards(&cards).unwrap();
    }
}
