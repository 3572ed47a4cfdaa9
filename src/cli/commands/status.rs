use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::status::StatusLogic;
use crate::errors::AppResult;
use crate::ui::messages;

/// Handles both `submit` and `paid`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let pool = open_db(cfg)?;

    let rec = match cmd {
        Commands::Submit { number, undo: false } => StatusLogic::mark_submitted(&pool.conn, number)?,
        Commands::Submit { number, undo: true } => StatusLogic::unmark_submitted(&pool.conn, number)?,
        Commands::Paid { number, undo: false } => StatusLogic::mark_paid(&pool.conn, number)?,
        Commands::Paid { number, undo: true } => StatusLogic::unmark_paid(&pool.conn, number)?,
        _ => return Ok(()),
    };

    messages::success(format!("{}: {}", rec.number, rec.status_label()));
    Ok(())
}
