//! Time-block layout engine.
//!
//! Applied independently to each day column on every frame:
//! normalize times ([`interval`]), group overlapping blocks ([`grouping`]),
//! assign background/foreground columns ([`columns`]) and map the result to
//! pixels ([`geometry`]).

pub mod columns;
pub mod geometry;
pub mod grouping;
pub mod interval;

use self::columns::{assign_columns, ColumnSlot};
use self::interval::MinuteInterval;
use crate::models::content_card::ContentCard;
use crate::models::planner_item::PlannerItem;

/// The item behind a calendar block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSource<'a> {
    Task(&'a PlannerItem),
    Content(&'a ContentCard),
}

impl<'a> LayoutSource<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            LayoutSource::Task(item) => &item.id,
            LayoutSource::Content(card) => &card.id,
        }
    }

    pub fn title(&self) -> &'a str {
        match *self {
            LayoutSource::Task(item) => &item.text,
            LayoutSource::Content(card) => card.display_title(),
        }
    }

    pub fn color(&self) -> Option<&'a str> {
        match *self {
            LayoutSource::Task(item) => item.color.as_deref(),
            LayoutSource::Content(card) => card.color.as_deref(),
        }
    }

    pub fn is_completed(&self) -> bool {
        match *self {
            LayoutSource::Task(item) => item.completed,
            LayoutSource::Content(card) => card.is_completed(),
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self, LayoutSource::Task(_))
    }

    pub fn as_task(&self) -> Option<&'a PlannerItem> {
        match *self {
            LayoutSource::Task(item) => Some(item),
            LayoutSource::Content(_) => None,
        }
    }

    /// `(start, end)` clock strings as stored on the source.
    pub fn clock_times(&self) -> (Option<&'a str>, Option<&'a str>) {
        match *self {
            LayoutSource::Task(item) => (item.start_time.as_deref(), item.end_time.as_deref()),
            LayoutSource::Content(card) => {
                let slot = card.slot();
                (slot.start_time, slot.end_time)
            }
        }
    }
}

/// A positioned timed block, rebuilt on every render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedLayoutEntry<'a> {
    pub source: LayoutSource<'a>,
    pub start_minutes: i32,
    pub end_minutes: i32,
    pub duration_minutes: i32,
    pub column: usize,
    pub total_columns: usize,
    pub is_background: bool,
    pub in_overlap_group: bool,
}

impl<'a> TimedLayoutEntry<'a> {
    pub fn new(source: LayoutSource<'a>, interval: MinuteInterval, slot: ColumnSlot) -> Self {
        Self {
            source,
            start_minutes: interval.start,
            end_minutes: interval.end,
            duration_minutes: interval.duration,
            column: slot.column,
            total_columns: slot.total_columns,
            is_background: slot.is_background,
            in_overlap_group: slot.in_overlap_group,
        }
    }

    pub fn interval(&self) -> MinuteInterval {
        MinuteInterval {
            start: self.start_minutes,
            end: self.end_minutes,
            duration: self.duration_minutes,
        }
    }

    pub fn slot(&self) -> ColumnSlot {
        ColumnSlot {
            column: self.column,
            total_columns: self.total_columns,
            is_background: self.is_background,
            in_overlap_group: self.in_overlap_group,
        }
    }
}

/// Layout of one day column.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DayLayout<'a> {
    /// Timed entries, in input order
    pub timed: Vec<TimedLayoutEntry<'a>>,
    /// Sources without a usable time range, in input order
    pub untimed: Vec<LayoutSource<'a>>,
}

impl<'a> DayLayout<'a> {
    pub fn find(&self, id: &str) -> Option<&TimedLayoutEntry<'a>> {
        self.timed.iter().find(|entry| entry.source.id() == id)
    }

    /// Paint order: full-width blocks first so foreground chips land on top.
    pub fn paint_order(&self) -> impl Iterator<Item = &TimedLayoutEntry<'a>> {
        let full_width = self.timed.iter().filter(|entry| !entry.in_overlap_group);
        let foreground = self.timed.iter().filter(|entry| entry.in_overlap_group);
        full_width.chain(foreground)
    }
}

/// Lay out one day's sources.
///
/// Sources missing a start or end time, or whose times do not parse, end up
/// in [`DayLayout::untimed`]; unparseable times are logged, never returned
/// as errors.
pub fn layout_day<'a, I>(sources: I) -> DayLayout<'a>
where
    I: IntoIterator<Item = LayoutSource<'a>>,
{
    let mut timed_sources = Vec::new();
    let mut intervals = Vec::new();
    let mut untimed = Vec::new();

    for source in sources {
        match source.clock_times() {
            (Some(start), Some(end)) => match MinuteInterval::from_clock(start, end) {
                Ok(interval) => {
                    timed_sources.push(source);
                    intervals.push(interval);
                }
                Err(err) => {
                    log::warn!("Showing '{}' as untimed: {}", source.id(), err);
                    untimed.push(source);
                }
            },
            _ => untimed.push(source),
        }
    }

    let slots = assign_columns(&intervals);
    let timed = timed_sources
        .into_iter()
        .zip(intervals)
        .zip(slots)
        .map(|((source, interval), slot)| TimedLayoutEntry::new(source, interval, slot))
        .collect();

    DayLayout { timed, untimed }
}
