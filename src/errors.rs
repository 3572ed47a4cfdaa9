//! Unified application error type.
//! All modules (db, core, render, notify, cli, service) return AppError to keep
//! the error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Invoice {0} not found")]
    NotFound(String),

    #[error("Invoice {0} already exists")]
    Duplicate(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Lifecycle errors
    // ---------------------------
    #[error("Invalid status change: {0}")]
    InvalidTransition(String),

    // ---------------------------
    // Output errors
    // ---------------------------
    #[error("Render error: {0}")]
    Render(String),

    #[error("Email delivery failed: {0}")]
    Transport(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
