use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::notify;
use crate::render::PdfInvoiceRenderer;
use crate::service::{self, AppState};
use crate::ui::messages;
use std::sync::Arc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind, port } = cmd {
        // schema is brought up to date once, before any request
        drop(open_db(cfg)?);

        let bind = bind.clone().unwrap_or_else(|| cfg.server.bind.clone());
        let port = port.unwrap_or(cfg.server.port);

        if !cfg.email_configured() {
            messages::warning("Email is not configured; approval emails will not be sent.");
        }

        let state = Arc::new(AppState::new(
            cfg.clone(),
            Arc::new(PdfInvoiceRenderer),
            notify::from_config(cfg)?,
        ));

        messages::info(format!("Serving on http://{bind}:{port}"));
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(service::serve(state, &bind, port))?;
    }
    Ok(())
}
