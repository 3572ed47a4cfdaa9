use rusqlite::{Connection, OptionalExtension, Result};

/// Day column prefixes, Monday to Friday.
pub const DAY_PREFIXES: [&str; 5] = ["monday", "tuesday", "wednesday", "thursday", "friday"];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `invoices` table exists.
fn invoices_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='invoices'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Per-day column definitions, e.g. `monday_date TEXT, monday_in TEXT, ...`.
fn day_columns_ddl() -> String {
    DAY_PREFIXES
        .iter()
        .map(|d| {
            format!(
                "{d}_date TEXT,
            {d}_in TEXT,
            {d}_out TEXT,
            {d}_hours_worked REAL,
            {d}_unit_price REAL,
            {d}_line_total REAL,"
            )
        })
        .collect::<Vec<_>>()
        .join("\n            ")
}

/// Create the `invoices` table. One flat row per weekly record.
fn create_invoices_table(conn: &Connection) -> Result<()> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS invoices (
            pk                  INTEGER PRIMARY KEY AUTOINCREMENT,
            seq                 INTEGER NOT NULL UNIQUE,
            invoice_number      TEXT NOT NULL UNIQUE,
            invoice_create_date TEXT NOT NULL,
            payment_terms       INTEGER NOT NULL DEFAULT 15,
            due_date            TEXT NOT NULL,
            payee               TEXT NOT NULL,
            payee_address       TEXT NOT NULL,
            payor               TEXT NOT NULL,
            payor_address       TEXT NOT NULL,
            payor_phone         TEXT NOT NULL,

            {days}

            total_hours         REAL NOT NULL,
            line_total          REAL NOT NULL,
            submitted           INTEGER NOT NULL DEFAULT 0 CHECK(submitted IN (0,1)),
            paid                INTEGER NOT NULL DEFAULT 0 CHECK(paid IN (0,1)),
            created_at          TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_invoices_create_date ON invoices(invoice_create_date);
        CREATE INDEX IF NOT EXISTS idx_invoices_status ON invoices(submitted, paid);
        "#,
        days = day_columns_ddl()
    );

    conn.execute_batch(&ddl)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db(). Safe to call on an already initialized database.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let version = "20251005_0001_create_invoices";
    if !invoices_table_exists(conn)? {
        create_invoices_table(conn)?;
        tracing::info!(version, "created invoices table");
    }

    if !migration_applied(conn, version)? {
        mark_applied(conn, version, "Created invoices table")?;
    }

    Ok(())
}
