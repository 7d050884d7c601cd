use chrono::NaiveDate;

use crate::services::drag::CreateRequest;
use crate::services::layout::geometry::Zoom;
use crate::services::planner::PlannerAction;

pub mod day_view;
pub mod month_view;
mod palette;
pub mod time_grid;
pub mod utils;
pub mod week_view;

/// What a view asks the app to do after it has been drawn.
///
/// Views only read the store; every change comes back through here and is
/// dispatched once the frame's borrows have ended.
#[derive(Debug, Default)]
pub struct ViewResult {
    pub actions: Vec<PlannerAction>,
    /// A finished drag-to-create selection
    pub create_request: Option<CreateRequest>,
    /// Task to open in the editor
    pub edit_item: Option<String>,
    /// Switch to the Today view on this date
    pub open_date: Option<NaiveDate>,
    pub zoom: Option<Zoom>,
}

impl ViewResult {
    pub fn merge(&mut self, other: ViewResult) {
        self.actions.extend(other.actions);
        self.create_request = other.create_request.or(self.create_request.take());
        self.edit_item = other.edit_item.or(self.edit_item.take());
        self.open_date = other.open_date.or(self.open_date);
        self.zoom = other.zoom.or(self.zoom);
    }
}
