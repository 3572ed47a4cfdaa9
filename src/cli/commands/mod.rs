pub mod batch;
pub mod config;
pub mod db;
pub mod init;
pub mod list;
pub mod log;
pub mod populate;
pub mod render;
pub mod send;
pub mod serve;
pub mod show;
pub mod stats;
pub mod status;
pub mod weekly;

use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::NaiveDate;

/// Open the configured database, bringing its schema up to date.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    run_pending_migrations(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn parse_date_arg(raw: &str) -> AppResult<NaiveDate> {
    date::parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}
