use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::delivery::{Audience, DeliveryLogic};
use crate::db::queries::{get_record, latest_pending};
use crate::errors::{AppError, AppResult};
use crate::notify;
use crate::render::PdfInvoiceRenderer;
use crate::ui::messages;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Send { number, approval } = cmd {
        if !cfg.email_configured() {
            return Err(AppError::Config(
                "SMTP credentials missing; set mail.username/mail.password".into(),
            ));
        }

        let pool = open_db(cfg)?;
        let rec = match number {
            Some(n) => get_record(&pool.conn, n)?,
            None => match latest_pending(&pool.conn, date::today())? {
                Some(rec) => rec,
                None => {
                    messages::info("No pending invoice to send.");
                    return Ok(());
                }
            },
        };
        let notifier = notify::from_config(cfg)?;

        let audience = if *approval {
            Audience::Approval
        } else {
            Audience::Billing
        };

        let path = DeliveryLogic::deliver(
            &pool.conn,
            cfg,
            &PdfInvoiceRenderer,
            notifier.as_ref(),
            &rec,
            audience,
        )?;

        messages::success(format!(
            "{} sent ({}) with {}",
            rec.number,
            audience.as_str(),
            path.display()
        ));
    }
    Ok(())
}
