//! Time utilities: parsing HH:MM and formatting for documents.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn require_time(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// "10:00" as stored in the database.
pub fn to_db(t: &NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// "10:00 AM" as printed on documents.
pub fn to_clock(t: &NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}
