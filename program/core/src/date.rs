//! Date Resolution
//!
//! Produces the calendar-date strings used to match "today" against the
//! days of the fetched schedule. Dates are always `YYYY-MM-DD`, zero-padded,
//! in the local time zone.

use chrono::{Datelike, Local, NaiveDate};

/// Source of the current calendar date
pub trait Clock {
    /// Today's date in the local time zone
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system's local time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Format a date as `YYYY-MM-DD`
pub fn date_string(date: &impl Datelike) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Today's date string according to `clock`
pub fn today_string(clock: &(impl Clock + ?Sized)) -> String {
    date_string(&clock.today())
}

/// Whether `value` looks like a `YYYY-MM-DD` calendar date
pub(crate) fn is_date_string(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_clock_formats_conference_day() {
        let clock = FixedClock(ymd(2024, 11, 6));
        assert_eq!(today_string(&clock), "2024-11-06");
    }

    #[test]
    fn test_single_digit_month_and_day_are_padded() {
        let s = date_string(&ymd(2025, 1, 2));
        assert_eq!(s, "2025-01-02");
        assert_eq!(s.len(), 10);
    }

    #[test]
    fn test_system_clock_is_ten_chars() {
        let s = today_string(&SystemClock);
        assert_eq!(s.len(), 10);
        assert!(is_date_string(&s));
    }

    #[test]
    fn test_is_date_string() {
        assert!(is_date_string("2024-11-08"));
        assert!(!is_date_string("2024-11-8"));
        assert!(!is_date_string("2024-13-01"));
        assert!(!is_date_string("Friday"));
    }
}
