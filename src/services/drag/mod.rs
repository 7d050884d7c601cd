//! Drag interaction controller.
//!
//! A pointer-driven state machine: `Idle -> Creating | Resizing | Moving -> Idle`.
//! The controller only returns data (preview ranges, commits, create requests);
//! the egui adapter feeds it pointer samples and the store applies its output.
//! Only one interaction can be active; presses outside `Idle` are ignored.

mod create;
mod resize;

pub use self::resize::ResizeEdge;

use chrono::NaiveDate;

use self::create::CreateDrag;
use self::resize::{MoveDrag, ResizeDrag};
use crate::models::planner_item::PlannerItem;
use crate::services::layout::geometry::{ViewMetrics, Zoom};
use crate::services::layout::interval::MinuteInterval;
use crate::utils::time::{format_clock, snap_floor, LAST_MINUTE};

/// Which view the drag is happening in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragView {
    Day,
    Week,
}

/// Grid and minimum-duration rules for one view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    pub metrics: ViewMetrics,
    pub create_snap_minutes: i32,
    pub create_min_span: i32,
    pub resize_snap_minutes: i32,
    pub resize_min_duration: i32,
}

impl DragConfig {
    pub const DAY: DragConfig = DragConfig {
        metrics: ViewMetrics::DAY,
        create_snap_minutes: 10,
        create_min_span: 10,
        resize_snap_minutes: 10,
        resize_min_duration: 15,
    };

    pub const WEEK: DragConfig = DragConfig {
        metrics: ViewMetrics::WEEK,
        create_snap_minutes: 30,
        create_min_span: 20,
        resize_snap_minutes: 10,
        resize_min_duration: 10,
    };

    pub fn for_view(view: DragView) -> Self {
        match view {
            DragView::Day => Self::DAY,
            DragView::Week => Self::WEEK,
        }
    }
}

/// A grid slot under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotTime {
    pub hour: i32,
    pub minute: i32,
}

impl SlotTime {
    /// Slot at a y offset of the day column: hour clamped to 0..=23, minute
    /// floored to the create grid.
    pub fn at_offset(y: f32, zoom: Zoom, config: &DragConfig) -> Self {
        // Tolerance keeps float noise from dropping an exact slot boundary a minute early
        let raw = config.metrics.minutes_at_offset(y, zoom) + 1e-3;
        let minutes = (raw.floor() as i32).clamp(0, LAST_MINUTE);
        Self {
            hour: minutes / 60,
            minute: snap_floor(minutes % 60, config.create_snap_minutes),
        }
    }

    pub fn minutes(&self) -> i32 {
        self.hour * 60 + self.minute
    }
}

/// A start/end pair in minutes since midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeRange {
    pub start_minutes: i32,
    pub end_minutes: i32,
}

impl TimeRange {
    pub fn new(start_minutes: i32, end_minutes: i32) -> Self {
        Self {
            start_minutes,
            end_minutes,
        }
    }

    pub fn from_interval(interval: MinuteInterval) -> Self {
        Self::new(interval.start, interval.end)
    }

    pub fn duration(&self) -> i32 {
        self.end_minutes - self.start_minutes
    }

    pub fn start_clock(&self) -> String {
        format_clock(self.start_minutes)
    }

    pub fn end_clock(&self) -> String {
        format_clock(self.end_minutes)
    }
}

/// Pointer position during a drag, in day-column coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Date of the column under the pointer
    pub date: NaiveDate,
    /// Offset from the top of the day column (00:00)
    pub y: f32,
}

/// The part of an item a commit changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitChange {
    Start(i32),
    End(i32),
    Range(TimeRange),
}

/// An optimistic update to write back immediately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemCommit {
    pub item_id: String,
    pub date: NaiveDate,
    pub change: CommitChange,
}

/// A finished drag-to-create selection, ready for item creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreateRequest {
    pub date: NaiveDate,
    pub range: TimeRange,
}

/// Intermediate output of a pointer move.
#[derive(Clone, Debug, PartialEq)]
pub enum DragUpdate {
    /// Selection shown while drag-creating
    Preview { date: NaiveDate, range: TimeRange },
    Commit(ItemCommit),
}

/// Result of releasing or cancelling.
#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    /// Nothing was active
    Ignored,
    /// The interaction ended without producing anything
    Discarded,
    Create(CreateRequest),
    /// Resize/move finished; its commits were already emitted
    Finished,
    /// Restore the item as it was before the drag
    Revert(PlannerItem),
}

#[derive(Clone, Debug, PartialEq)]
enum DragState {
    Idle,
    Creating(CreateDrag),
    Resizing(ResizeDrag),
    Moving(MoveDrag),
}

/// Pure drag state machine for one view.
#[derive(Clone, Debug)]
pub struct DragController {
    config: DragConfig,
    state: DragState,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
        }
    }

    pub fn for_view(view: DragView) -> Self {
        Self::new(DragConfig::for_view(view))
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    /// Id of the item being resized or moved.
    pub fn active_item(&self) -> Option<&str> {
        match &self.state {
            DragState::Resizing(drag) => Some(&drag.original.id),
            DragState::Moving(drag) => Some(&drag.original.id),
            _ => None,
        }
    }

    /// Current drag-create selection, for painting.
    pub fn create_preview(&self) -> Option<CreateRequest> {
        match &self.state {
            DragState::Creating(drag) => Some(CreateRequest {
                date: drag.date,
                range: drag.finish(&self.config),
            }),
            _ => None,
        }
    }

    /// Press on an empty slot starts drag-to-create.
    pub fn press_empty_slot(&mut self, date: NaiveDate, y: f32, zoom: Zoom) -> bool {
        if !self.is_idle() {
            log::debug!("Ignoring create press while another drag is active");
            return false;
        }
        let drag = CreateDrag::begin(date, y, zoom, &self.config);
        log::debug!("Drag-create started at {:02}:{:02} on {}", drag.anchor.hour, drag.anchor.minute, date);
        self.state = DragState::Creating(drag);
        true
    }

    /// Press on a top/bottom handle starts a resize.
    pub fn press_resize_handle(
        &mut self,
        item: &PlannerItem,
        date: NaiveDate,
        edge: ResizeEdge,
        y: f32,
        zoom: Zoom,
    ) -> bool {
        if !self.is_idle() {
            log::debug!("Ignoring resize press while another drag is active");
            return false;
        }
        let Some(range) = item_range(item) else {
            log::debug!("Ignoring resize of untimed item {}", item.id);
            return false;
        };
        log::debug!("Resize {:?} started for item {}", edge, item.id);
        self.state = DragState::Resizing(ResizeDrag::new(item.clone(), date, edge, range, y, zoom));
        true
    }

    /// Press on an item body starts a move.
    pub fn press_item(&mut self, item: &PlannerItem, date: NaiveDate, y: f32, zoom: Zoom) -> bool {
        if !self.is_idle() {
            log::debug!("Ignoring move press while another drag is active");
            return false;
        }
        let Some(range) = item_range(item) else {
            log::debug!("Ignoring move of untimed item {}", item.id);
            return false;
        };
        log::debug!("Move started for item {}", item.id);
        self.state = DragState::Moving(MoveDrag::new(item.clone(), date, range, y, zoom));
        true
    }

    /// Feed a pointer move. Returns a preview or a commit when something changed.
    pub fn on_press_move(&mut self, sample: PointerSample) -> Option<DragUpdate> {
        let config = self.config;
        match &mut self.state {
            DragState::Idle => None,
            DragState::Creating(drag) => {
                drag.update(sample.y, &config).then(|| DragUpdate::Preview {
                    date: drag.date,
                    range: drag.finish(&config),
                })
            }
            DragState::Resizing(drag) => {
                let boundary = drag.update(sample.y, &config)?;
                let change = match drag.edge {
                    ResizeEdge::Top => CommitChange::Start(boundary),
                    ResizeEdge::Bottom => CommitChange::End(boundary),
                };
                Some(DragUpdate::Commit(ItemCommit {
                    item_id: drag.original.id.clone(),
                    date: drag.date,
                    change,
                }))
            }
            DragState::Moving(drag) => {
                let range = drag.update(sample.date, sample.y, &config)?;
                Some(DragUpdate::Commit(ItemCommit {
                    item_id: drag.original.id.clone(),
                    date: sample.date,
                    change: CommitChange::Range(range),
                }))
            }
        }
    }

    /// Pointer release ends the interaction.
    pub fn on_press_end(&mut self) -> DragOutcome {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => {
                log::debug!("Release without an active drag");
                DragOutcome::Ignored
            }
            DragState::Creating(drag) if !drag.has_moved() => {
                log::debug!("Drag-create released without movement, discarding");
                DragOutcome::Discarded
            }
            DragState::Creating(drag) => {
                let range = drag.finish(&self.config);
                log::debug!(
                    "Drag-create finished: {} {}-{}",
                    drag.date,
                    range.start_clock(),
                    range.end_clock()
                );
                DragOutcome::Create(CreateRequest {
                    date: drag.date,
                    range,
                })
            }
            DragState::Resizing(_) | DragState::Moving(_) => DragOutcome::Finished,
        }
    }

    /// Abort the interaction (Escape). Resizes and moves revert to the original item.
    pub fn cancel(&mut self) -> DragOutcome {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => DragOutcome::Ignored,
            DragState::Creating(_) => DragOutcome::Discarded,
            DragState::Resizing(drag) => DragOutcome::Revert(drag.original),
            DragState::Moving(drag) => DragOutcome::Revert(drag.original),
        }
    }
}

fn item_range(item: &PlannerItem) -> Option<TimeRange> {
    let (start, end) = (item.start_time.as_deref()?, item.end_time.as_deref()?);
    MinuteInterval::from_clock(start, end)
        .ok()
        .map(TimeRange::from_interval)
}
