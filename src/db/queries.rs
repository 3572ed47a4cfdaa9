use crate::db::migrate::DAY_PREFIXES;
use crate::errors::{AppError, AppResult};
use crate::models::record::{DayEntry, Parties, WorkRecord};
use crate::models::status::StatusFilter;
use crate::utils::{date, time};
use chrono::{Days, NaiveDate, NaiveTime};
use rusqlite::types::Value;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params_from_iter};

const BASE_COLUMNS: [&str; 10] = [
    "seq",
    "invoice_number",
    "invoice_create_date",
    "payment_terms",
    "due_date",
    "payee",
    "payee_address",
    "payor",
    "payor_address",
    "payor_phone",
];

const DAY_FIELDS: [&str; 6] = [
    "date",
    "in",
    "out",
    "hours_worked",
    "unit_price",
    "line_total",
];

const TAIL_COLUMNS: [&str; 4] = ["total_hours", "line_total", "submitted", "paid"];

fn insert_columns() -> Vec<String> {
    let mut cols: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    for day in DAY_PREFIXES {
        for field in DAY_FIELDS {
            cols.push(format!("{day}_{field}"));
        }
    }
    cols.extend(TAIL_COLUMNS.iter().map(|c| c.to_string()));
    cols
}

fn record_values(rec: &WorkRecord) -> Vec<Value> {
    let mut values = vec![
        Value::Integer(rec.seq as i64),
        Value::Text(rec.number.clone()),
        Value::Text(date::to_db(&rec.created)),
        Value::Integer(rec.payment_terms as i64),
        Value::Text(date::to_db(&rec.due)),
        Value::Text(rec.parties.payee.clone()),
        Value::Text(rec.parties.payee_address.clone()),
        Value::Text(rec.parties.payor.clone()),
        Value::Text(rec.parties.payor_address.clone()),
        Value::Text(rec.parties.payor_phone.clone()),
    ];

    for day in &rec.days {
        match day {
            Some(d) => values.extend([
                Value::Text(date::to_db(&d.date)),
                Value::Text(time::to_db(&d.time_in)),
                Value::Text(time::to_db(&d.time_out)),
                Value::Real(d.hours),
                Value::Real(d.unit_price),
                Value::Real(d.line_total),
            ]),
            None => values.extend(std::iter::repeat_n(Value::Null, DAY_FIELDS.len())),
        }
    }

    values.extend([
        Value::Real(rec.total_hours),
        Value::Real(rec.total_amount),
        Value::Integer(rec.submitted as i64),
        Value::Integer(rec.paid as i64),
    ]);
    values
}

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn col_date(row: &Row, col: &str) -> Result<NaiveDate> {
    let raw: String = row.get(col)?;
    date::parse_date(&raw).ok_or_else(|| conversion_error(AppError::InvalidDate(raw)))
}

fn col_time(row: &Row, col: &str) -> Result<NaiveTime> {
    let raw: String = row.get(col)?;
    time::parse_time(&raw).ok_or_else(|| conversion_error(AppError::InvalidTime(raw)))
}

fn map_day(row: &Row, prefix: &str) -> Result<Option<DayEntry>> {
    let raw_date: Option<String> = row.get(format!("{prefix}_date").as_str())?;
    if raw_date.is_none() {
        return Ok(None);
    }

    Ok(Some(DayEntry {
        date: col_date(row, &format!("{prefix}_date"))?,
        time_in: col_time(row, &format!("{prefix}_in"))?,
        time_out: col_time(row, &format!("{prefix}_out"))?,
        hours: row.get(format!("{prefix}_hours_worked").as_str())?,
        unit_price: row.get(format!("{prefix}_unit_price").as_str())?,
        line_total: row.get(format!("{prefix}_line_total").as_str())?,
    }))
}

pub fn map_row(row: &Row) -> Result<WorkRecord> {
    let seq: i64 = row.get("seq")?;
    let terms: i64 = row.get("payment_terms")?;

    let days = [
        map_day(row, DAY_PREFIXES[0])?,
        map_day(row, DAY_PREFIXES[1])?,
        map_day(row, DAY_PREFIXES[2])?,
        map_day(row, DAY_PREFIXES[3])?,
        map_day(row, DAY_PREFIXES[4])?,
    ];

    Ok(WorkRecord {
        seq: seq as u32,
        number: row.get("invoice_number")?,
        created: col_date(row, "invoice_create_date")?,
        payment_terms: terms as u32,
        due: col_date(row, "due_date")?,
        parties: Parties {
            payee: row.get("payee")?,
            payee_address: row.get("payee_address")?,
            payor: row.get("payor")?,
            payor_address: row.get("payor_address")?,
            payor_phone: row.get("payor_phone")?,
        },
        days,
        total_hours: row.get("total_hours")?,
        total_amount: row.get("line_total")?,
        submitted: row.get::<_, i64>("submitted")? == 1,
        paid: row.get::<_, i64>("paid")? == 1,
    })
}

/// Turn a UNIQUE violation into a duplicate-identifier error. Other
/// constraint failures stay database errors.
fn map_insert_error(e: rusqlite::Error, number: &str) -> AppError {
    match e {
        rusqlite::Error::SqliteFailure(ref f, _)
            if f.code == ErrorCode::ConstraintViolation
                && f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            AppError::Duplicate(number.to_string())
        }
        other => AppError::Db(other),
    }
}

/// Insert a single record. Never overwrites: an existing identifier is an error.
pub fn insert_record(conn: &Connection, rec: &WorkRecord) -> AppResult<()> {
    let cols = insert_columns();
    let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO invoices ({}) VALUES ({})",
        cols.join(", "),
        placeholders.join(", ")
    );

    conn.execute(&sql, params_from_iter(record_values(rec)))
        .map_err(|e| map_insert_error(e, &rec.number))?;
    Ok(())
}

/// Insert many records in a single transaction: all of them or none.
pub fn insert_records(conn: &mut Connection, recs: &[WorkRecord]) -> AppResult<usize> {
    let tx = conn.transaction()?;
    for rec in recs {
        insert_record(&tx, rec)?;
    }
    tx.commit()?;
    Ok(recs.len())
}

pub fn find_record(conn: &Connection, number: &str) -> AppResult<Option<WorkRecord>> {
    let rec = conn
        .query_row(
            "SELECT * FROM invoices WHERE invoice_number = ?1",
            [number],
            map_row,
        )
        .optional()?;
    Ok(rec)
}

/// Like [`find_record`], but a missing identifier is an error.
pub fn get_record(conn: &Connection, number: &str) -> AppResult<WorkRecord> {
    find_record(conn, number)?.ok_or_else(|| AppError::NotFound(number.to_string()))
}

/// Record covering the work week that starts on `monday`, if any.
pub fn find_by_week(conn: &Connection, monday: NaiveDate) -> AppResult<Option<WorkRecord>> {
    let Some(created) = monday.checked_add_days(Days::new(6)) else {
        return Ok(None);
    };
    let rec = conn
        .query_row(
            "SELECT * FROM invoices WHERE invoice_create_date = ?1 ORDER BY seq LIMIT 1",
            [date::to_db(&created)],
            map_row,
        )
        .optional()?;
    Ok(rec)
}

pub fn list_records(conn: &Connection, filter: Option<StatusFilter>) -> AppResult<Vec<WorkRecord>> {
    let mut sql = String::from("SELECT * FROM invoices WHERE 1=1");
    let mut args: Vec<Value> = Vec::new();

    if let Some(f) = filter {
        let (submitted, paid) = f.flags();
        if let Some(s) = submitted {
            args.push(Value::Integer(s as i64));
            sql.push_str(&format!(" AND submitted = ?{}", args.len()));
        }
        if let Some(p) = paid {
            args.push(Value::Integer(p as i64));
            sql.push_str(&format!(" AND paid = ?{}", args.len()));
        }
    }
    sql.push_str(" ORDER BY seq ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn set_flag(conn: &Connection, column: &str, number: &str, value: bool) -> AppResult<()> {
    let sql = format!("UPDATE invoices SET {column} = ?1 WHERE invoice_number = ?2");
    let changed = conn.execute(&sql, rusqlite::params![value as i64, number])?;

    // SQLite counts matched rows, so re-setting the same value still reports 1.
    if changed == 0 {
        return Err(AppError::NotFound(number.to_string()));
    }
    Ok(())
}

pub fn set_submitted(conn: &Connection, number: &str, value: bool) -> AppResult<()> {
    set_flag(conn, "submitted", number, value)
}

pub fn set_paid(conn: &Connection, number: &str, value: bool) -> AppResult<()> {
    set_flag(conn, "paid", number, value)
}

/// Next free sequence number (1 on an empty store).
pub fn next_seq(conn: &Connection) -> AppResult<u32> {
    let next: i64 = conn.query_row(
        "SELECT COALESCE(MAX(seq), 0) + 1 FROM invoices",
        [],
        |row| row.get(0),
    )?;
    Ok(next as u32)
}

/// Most recent record not yet submitted, created on or before `day`.
pub fn latest_pending(conn: &Connection, day: NaiveDate) -> AppResult<Option<WorkRecord>> {
    let rec = conn
        .query_row(
            "SELECT * FROM invoices
             WHERE submitted = 0 AND invoice_create_date <= ?1
             ORDER BY invoice_create_date DESC, seq DESC
             LIMIT 1",
            [date::to_db(&day)],
            map_row,
        )
        .optional()?;
    Ok(rec)
}
