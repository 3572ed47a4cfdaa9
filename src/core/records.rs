use crate::core::generator::{self, GeneratorParams};
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{find_by_week, insert_record, insert_records, next_seq};
use crate::errors::AppResult;
use crate::models::record::WorkRecord;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Store-level record creation: batch population and on-demand weeks.
pub struct RecordLogic;

impl RecordLogic {
    /// Generate every week between `from` and `to` and insert them in one
    /// transaction, numbering from 1. Fails as a whole if any identifier exists.
    pub fn populate(
        pool: &mut DbPool,
        params: &GeneratorParams,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<WorkRecord>> {
        let records = generator::generate(params, from, to, 1)?;

        let n = insert_records(&mut pool.conn, &records)?;
        ttlog_soft(
            &pool.conn,
            "populate",
            &format!("{from}..{to}"),
            &format!("Inserted {n} weekly invoices"),
        );

        Ok(records)
    }

    /// Record for the week starting on `monday`: the existing one if the week
    /// was already generated, otherwise a new one with the next sequence number.
    /// The flag tells whether it was created now.
    pub fn ensure_week(
        conn: &Connection,
        params: &GeneratorParams,
        monday: NaiveDate,
    ) -> AppResult<(WorkRecord, bool)> {
        if let Some(existing) = find_by_week(conn, monday)? {
            return Ok((existing, false));
        }

        let rec = generator::build_week(params, monday, next_seq(conn)?)?;
        insert_record(conn, &rec)?;
        ttlog_soft(
            conn,
            "generate",
            &rec.number,
            &format!("Generated invoice for week of {}", rec.week_start()),
        );

        tracing::info!(invoice = %rec.number, week = %rec.week_start(), "generated weekly invoice");
        Ok((rec, true))
    }
}
