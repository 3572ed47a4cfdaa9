//! Weekly record generation.
//!
//! Records are anchored on a Sunday: the Sunday is the creation date and the
//! work week is the Monday..Friday that precedes it.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::record::{DayEntry, Parties, WORK_DAYS, WorkRecord};
use crate::utils::{date, time};
use chrono::{Datelike, Days, NaiveDate, NaiveTime};

/// Everything that is fixed per deployment.
#[derive(Debug, Clone)]
pub struct GeneratorParams {
    pub parties: Parties,
    pub hours_per_day: f64,
    pub unit_price: f64,
    pub payment_terms: u32,
    pub time_in: NaiveTime,
    pub time_out: NaiveTime,
}

impl GeneratorParams {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let p = &cfg.parties;
        Ok(Self {
            parties: Parties {
                payee: p.payee.clone(),
                payee_address: p.payee_address.clone(),
                payor: p.payor.clone(),
                payor_address: p.payor_address.clone(),
                payor_phone: p.payor_phone.clone(),
            },
            hours_per_day: cfg.billing.hours_per_day,
            unit_price: cfg.billing.hourly_rate,
            payment_terms: cfg.billing.payment_terms,
            time_in: time::require_time(&cfg.billing.time_in)?,
            time_out: time::require_time(&cfg.billing.time_out)?,
        })
    }
}

/// Build the record for the work week starting on `monday`.
pub fn build_week(
    params: &GeneratorParams,
    monday: NaiveDate,
    seq: u32,
) -> AppResult<WorkRecord> {
    let monday = date::monday_of(monday)?;
    let created = date::shift(monday, 6)?;
    // Friday precedes `created`, so every work day is in range from here on.
    let days = WORK_DAYS.map(|wd| {
        let d = monday + Days::new(wd.num_days_from_monday() as u64);
        Some(DayEntry::new(
            d,
            params.time_in,
            params.time_out,
            params.hours_per_day,
            params.unit_price,
        ))
    });

    WorkRecord::new(
        seq,
        created,
        params.payment_terms,
        params.parties.clone(),
        days,
    )
}

/// One record per week from `start` to `end`.
///
/// The first anchor is `start` itself when it is a Sunday, otherwise the first
/// Sunday after it. A week is included while its Friday is not after `end`.
/// Sequence numbers start at `first_seq` and grow by one per record.
pub fn generate(
    params: &GeneratorParams,
    start: NaiveDate,
    end: NaiveDate,
    first_seq: u32,
) -> AppResult<Vec<WorkRecord>> {
    if end < start {
        return Err(AppError::InvalidRange(format!(
            "end date {} is before start date {}",
            end, start
        )));
    }

    let mut out = Vec::new();
    let mut sunday = date::sunday_on_or_after(start)?;
    let mut seq = first_seq;

    loop {
        let friday = date::shift(sunday, -2)?;
        if friday > end {
            break;
        }

        let monday = date::shift(sunday, -6)?;
        out.push(build_week(params, monday, seq)?);

        seq += 1;
        match sunday.checked_add_days(Days::new(7)) {
            Some(next) => sunday = next,
            None => break,
        }
    }

    Ok(out)
}

/// Monday of the most recent Mon..Fri week whose Friday is strictly before `today`.
pub fn last_completed_week(today: NaiveDate) -> AppResult<NaiveDate> {
    let since_friday = (today.weekday().num_days_from_monday() + 2) % 7 + 1;
    date::shift(today, -(since_friday as i64 + 4))
}
