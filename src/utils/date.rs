use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// ISO format used in the database.
pub fn to_db(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// US format printed on documents and listings: 10/05/2025
pub fn to_us(d: &NaiveDate) -> String {
    d.format("%m/%d/%Y").to_string()
}

/// `d` moved by `days` (negative goes back). Leaving the calendar is an
/// `InvalidRange` error instead of a panic.
pub fn shift(d: NaiveDate, days: i64) -> AppResult<NaiveDate> {
    let step = Days::new(days.unsigned_abs());
    let moved = if days < 0 {
        d.checked_sub_days(step)
    } else {
        d.checked_add_days(step)
    };
    moved.ok_or_else(|| {
        AppError::InvalidRange(format!("{} shifted by {} days is out of range", to_db(&d), days))
    })
}

/// Monday of the week containing `d`.
pub fn monday_of(d: NaiveDate) -> AppResult<NaiveDate> {
    shift(d, -(d.weekday().num_days_from_monday() as i64))
}

/// First Sunday on or after `d`.
pub fn sunday_on_or_after(d: NaiveDate) -> AppResult<NaiveDate> {
    let wait = (7 - d.weekday().num_days_from_sunday()) % 7;
    shift(d, wait as i64)
}
