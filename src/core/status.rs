use crate::db::log::ttlog_soft;
use crate::db::queries::{get_record, set_paid, set_submitted};
use crate::errors::{AppError, AppResult};
use crate::models::record::WorkRecord;
use rusqlite::Connection;

/// Lifecycle policy on top of the two store flags.
///
/// Marking a record paid also marks it submitted. A paid record cannot be
/// un-submitted; clear `paid` first.
pub struct StatusLogic;

impl StatusLogic {
    pub fn mark_submitted(conn: &Connection, number: &str) -> AppResult<WorkRecord> {
        set_submitted(conn, number, true)?;
        ttlog_soft(conn, "submit", number, "Marked as submitted");
        get_record(conn, number)
    }

    pub fn mark_paid(conn: &Connection, number: &str) -> AppResult<WorkRecord> {
        set_paid(conn, number, true)?;
        set_submitted(conn, number, true)?;
        ttlog_soft(conn, "paid", number, "Marked as paid (and submitted)");
        get_record(conn, number)
    }

    pub fn unmark_submitted(conn: &Connection, number: &str) -> AppResult<WorkRecord> {
        let rec = get_record(conn, number)?;
        if rec.paid {
            return Err(AppError::InvalidTransition(format!(
                "{} is paid; clear the paid flag before un-submitting it",
                number
            )));
        }

        set_submitted(conn, number, false)?;
        ttlog_soft(conn, "unsubmit", number, "Cleared submitted flag");
        get_record(conn, number)
    }

    pub fn unmark_paid(conn: &Connection, number: &str) -> AppResult<WorkRecord> {
        set_paid(conn, number, false)?;
        ttlog_soft(conn, "unpaid", number, "Cleared paid flag");
        get_record(conn, number)
    }
}
