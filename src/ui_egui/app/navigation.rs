use super::PlannerApp;
use crate::models::ui::ViewType;
use crate::utils::date::add_months;
use chrono::{Duration, Local, NaiveDate};

impl PlannerApp {
    pub(super) fn navigate_previous(&mut self) {
        self.current_date = step_date(self.current_view, self.current_date, -1);
    }

    pub(super) fn navigate_next(&mut self) {
        self.current_date = step_date(self.current_view, self.current_date, 1);
    }

    pub(super) fn jump_to_today(&mut self) {
        self.current_date = Local::now().date_naive();
    }
}

/// Move one page of `view` forwards (`direction > 0`) or backwards.
fn step_date(view: ViewType, date: NaiveDate, direction: i32) -> NaiveDate {
    match view {
        ViewType::Today => date + Duration::days(i64::from(direction)),
        ViewType::Week => date + Duration::weeks(i64::from(direction)),
        ViewType::Month => add_months(date, direction),
    }
}
