use crate::cli::commands::{open_db, parse_date_arg};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::weekly::{WeeklyLogic, WeeklyOutcome};
use crate::errors::AppResult;
use crate::notify;
use crate::render::PdfInvoiceRenderer;
use crate::ui::messages;
use crate::utils::{date, money};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Weekly { today } = cmd {
        let today = match today {
            Some(raw) => parse_date_arg(raw)?,
            None => date::today(),
        };

        let mut pool = open_db(cfg)?;
        let notifier = notify::from_config(cfg)?;

        match WeeklyLogic::run(&mut pool, cfg, &PdfInvoiceRenderer, notifier.as_ref(), today)? {
            WeeklyOutcome::AlreadySubmitted(rec) => {
                messages::info(format!(
                    "{} (week of {}) was already submitted; nothing to do.",
                    rec.number,
                    date::to_us(&rec.week_start())
                ));
            }
            WeeklyOutcome::Sent {
                record,
                path,
                created,
            } => {
                if created {
                    messages::info(format!("Generated {}", record.number));
                }
                messages::success(format!(
                    "{} ({}) sent to {} and marked submitted",
                    record.number,
                    money(record.total_amount),
                    cfg.mail.recipients.join(", ")
                ));
                println!("   File: {}", path.display());
            }
        }
    }
    Ok(())
}
