//! Calendar-day helpers.
//!
//! Days are `NaiveDate`s in the local calendar and are written as
//! `YYYY-MM-DD` wherever they are persisted or used as map keys.

use chrono::{Datelike, Local, NaiveDate};

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// The current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DAY_FORMAT).ok()
}

/// Number of days in the given month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Weekday of the first day of the month, 0 = Sunday.
pub fn first_weekday_of_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.weekday().num_days_from_sunday())
}

/// Every day of the month in ascending order. Empty for an invalid month.
pub fn month_dates(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(days) = days_in_month(year, month) else {
        return Vec::new();
    };
    (1..=days)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}

pub fn in_month(day: NaiveDate, year: i32, month: u32) -> bool {
    day.year() == year && day.month() == month
}
