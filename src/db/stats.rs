use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::stats::Stats;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::money;
use rusqlite::{Connection, OptionalExtension};
use std::fs;

/// Counts and amounts overall and by lifecycle flag.
pub fn summary_stats(conn: &Connection) -> AppResult<Stats> {
    let stats = conn.query_row(
        "SELECT
            COUNT(*),
            COALESCE(SUM(submitted), 0),
            COALESCE(SUM(paid), 0),
            COALESCE(SUM(line_total), 0.0),
            COALESCE(SUM(CASE WHEN submitted = 1 THEN line_total ELSE 0.0 END), 0.0),
            COALESCE(SUM(CASE WHEN paid = 1 THEN line_total ELSE 0.0 END), 0.0)
         FROM invoices",
        [],
        |row| {
            Ok(Stats {
                total_count: row.get(0)?,
                submitted_count: row.get(1)?,
                paid_count: row.get(2)?,
                total_amount: row.get(3)?,
                submitted_amount: row.get(4)?,
                paid_amount: row.get(5)?,
            })
        },
    )?;
    Ok(stats)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) TOTALS
    //
    let stats = summary_stats(&pool.conn)?;
    println!(
        "{}• Total invoices:{} {}{}{} ({})",
        CYAN,
        RESET,
        GREEN,
        stats.total_count,
        RESET,
        money(stats.total_amount)
    );

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT invoice_create_date FROM invoices ORDER BY invoice_create_date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT invoice_create_date FROM invoices ORDER BY invoice_create_date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
