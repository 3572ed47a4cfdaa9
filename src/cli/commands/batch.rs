use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries::list_records;
use crate::errors::AppResult;
use crate::render::{PdfInvoiceRenderer, write_document};
use crate::ui::messages;

/// Render every matching record. A failing record is reported and skipped.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Batch { status, output } = cmd {
        let pool = open_db(cfg)?;
        let records = list_records(&pool.conn, *status)?;

        if records.is_empty() {
            messages::info("Nothing to render.");
            return Ok(());
        }

        let dir = output.clone().unwrap_or_else(|| cfg.output_path());
        let mut ok = 0usize;
        let mut failed = 0usize;

        for rec in &records {
            match write_document(&PdfInvoiceRenderer, rec, &dir) {
                Ok(path) => {
                    ok += 1;
                    println!("   {} → {}", rec.number, path.display());
                }
                Err(e) => {
                    failed += 1;
                    messages::error(format!("{}: {}", rec.number, e));
                }
            }
        }

        if failed == 0 {
            messages::success(format!("Rendered {ok} invoices into {}", dir.display()));
        } else {
            messages::warning(format!("Rendered {ok} invoices, {failed} failed"));
        }
    }
    Ok(())
}
