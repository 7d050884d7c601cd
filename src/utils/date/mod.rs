// Date utility functions
// ISO date keys and week/month navigation helpers

use chrono::{Datelike, Duration, NaiveDate};

/// Storage format of planner date keys (`yyyy-MM-dd`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// The seven consecutive dates of the week containing `date`.
pub fn week_days(date: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let start = week_start(date, first_day_of_week);
    (0..7).map(|offset| start + Duration::days(offset)).collect()
}

/// Dates shown in a month grid: whole weeks covering the month of `date`.
pub fn month_grid(date: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let first_of_month = date.with_day(1).unwrap_or(date);
    let grid_start = week_start(first_of_month, first_day_of_week);

    let mut days = Vec::with_capacity(42);
    let mut cursor = grid_start;
    loop {
        days.push(cursor);
        cursor += Duration::days(1);
        let week_complete = days.len() % 7 == 0;
        if week_complete && cursor.month() != first_of_month.month() {
            break;
        }
    }
    days
}

/// Shift a date by whole months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;

    (1..=date.day())
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_round_trip() {
        let date = ymd(2025, 3, 7);
        assert_eq!(format_iso_date(date), "2025-03-07");
        assert_eq!(parse_iso_date("2025-03-07"), Some(date));
        assert_eq!(parse_iso_date("07/03/2025"), None);
    }

    #[test]
    fn test_week_start_sunday_and_monday() {
        // Wednesday
        let date = ymd(2025, 1, 15);
        assert_eq!(week_start(date, 0), ymd(2025, 1, 12));
        assert_eq!(week_start(date, 1), ymd(2025, 1, 13));
        assert_eq!(week_start(ymd(2025, 1, 13), 1).weekday(), Weekday::Mon);
    }

    #[test]
    fn test_week_days_has_seven_consecutive_dates() {
        let days = week_days(ymd(2025, 1, 15), 1);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], ymd(2025, 1, 13));
        assert_eq!(days[6], ymd(2025, 1, 19));
    }

    #[test]
    fn test_month_grid_covers_whole_weeks() {
        let grid = month_grid(ymd(2025, 2, 10), 1);
        assert_eq!(grid.len() % 7, 0);
        assert!(grid.contains(&ymd(2025, 2, 1)));
        assert!(grid.contains(&ymd(2025, 2, 28)));
        assert_eq!(grid[0].weekday(), Weekday::Mon);
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(ymd(2025, 1, 31), 1), ymd(2025, 2, 28));
        assert_eq!(add_months(ymd(2025, 12, 15), 1), ymd(2026, 1, 15));
        assert_eq!(add_months(ymd(2025, 1, 15), -1), ymd(2024, 12, 15));
    }
}
