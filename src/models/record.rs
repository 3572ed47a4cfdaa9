use crate::errors::{AppError, AppResult};
use chrono::{Days, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

/// Weekdays covered by a work record, in table order.
pub const WORK_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Static identity block printed on every invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parties {
    pub payee: String,
    pub payee_address: String,
    pub payor: String,
    pub payor_address: String,
    pub payor_phone: String,
}

/// One worked day inside a weekly record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub time_in: NaiveTime,
    pub time_out: NaiveTime,
    pub hours: f64,
    pub unit_price: f64,
    pub line_total: f64,
}

impl DayEntry {
    pub fn new(
        date: NaiveDate,
        time_in: NaiveTime,
        time_out: NaiveTime,
        hours: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            date,
            time_in,
            time_out,
            hours,
            unit_price,
            line_total: hours * unit_price,
        }
    }

    /// "Mon 10/06/2025"
    pub fn description(&self) -> String {
        self.date.format("%a %m/%d/%Y").to_string()
    }
}

/// A weekly invoice / timesheet.
///
/// Totals are computed once in [`WorkRecord::new`] and stored as-is; they are
/// never recalculated from the day entries afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkRecord {
    pub seq: u32,
    pub number: String,
    pub created: NaiveDate,
    pub payment_terms: u32,
    pub due: NaiveDate,
    pub parties: Parties,
    pub days: [Option<DayEntry>; 5],
    pub total_hours: f64,
    pub total_amount: f64,
    pub submitted: bool,
    pub paid: bool,
}

impl WorkRecord {
    pub fn new(
        seq: u32,
        created: NaiveDate,
        payment_terms: u32,
        parties: Parties,
        days: [Option<DayEntry>; 5],
    ) -> AppResult<Self> {
        let total_hours = days.iter().flatten().map(|d| d.hours).sum();
        let total_amount = days.iter().flatten().map(|d| d.line_total).sum();

        Ok(Self {
            seq,
            number: number_for(seq),
            created,
            payment_terms,
            due: due_date(created, payment_terms)?,
            parties,
            days,
            total_hours,
            total_amount,
            submitted: false,
            paid: false,
        })
    }

    /// Monday of the covered work week (records are created on the following Sunday).
    pub fn week_start(&self) -> NaiveDate {
        self.created.checked_sub_days(Days::new(6)).unwrap_or(self.created)
    }

    /// Last worked day, used as "week ending" in listings.
    pub fn week_end(&self) -> Option<NaiveDate> {
        self.days.iter().flatten().map(|d| d.date).last()
    }

    pub fn status_label(&self) -> String {
        let mut parts = Vec::new();
        if self.submitted {
            parts.push("✓ Submitted");
        }
        if self.paid {
            parts.push("✓ Paid");
        }

        if parts.is_empty() {
            "Pending".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

/// Human-readable identifier for a sequence number: 1 → "N001".
pub fn number_for(seq: u32) -> String {
    format!("N{:03}", seq)
}

pub fn due_date(created: NaiveDate, payment_terms: u32) -> AppResult<NaiveDate> {
    created
        .checked_add_days(Days::new(payment_terms as u64))
        .ok_or_else(|| {
            AppError::InvalidRange(format!(
                "due date {payment_terms} days after {created} is out of range"
            ))
        })
}
