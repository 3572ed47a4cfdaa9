use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries::get_record;
use crate::errors::AppResult;
use crate::render::{PdfInvoiceRenderer, write_document};
use crate::ui::messages;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Render { number, output } = cmd {
        let pool = open_db(cfg)?;
        let rec = get_record(&pool.conn, number)?;

        let dir = output.clone().unwrap_or_else(|| cfg.output_path());
        let path = write_document(&PdfInvoiceRenderer, &rec, &dir)?;

        messages::success(format!("{} rendered to {}", rec.number, path.display()));
    }
    Ok(())
}
