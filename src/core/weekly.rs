use crate::config::Config;
use crate::core::delivery::{Audience, DeliveryLogic};
use crate::core::generator::{GeneratorParams, last_completed_week};
use crate::core::records::RecordLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::record::WorkRecord;
use crate::notify::Notifier;
use crate::render::DocumentRenderer;
use chrono::NaiveDate;
use std::path::PathBuf;

/// What a weekly run did.
#[derive(Debug)]
pub enum WeeklyOutcome {
    /// The week's record was already submitted; nothing was sent.
    AlreadySubmitted(WorkRecord),
    /// The record was rendered, sent to billing and marked submitted.
    Sent {
        record: WorkRecord,
        path: PathBuf,
        created: bool,
    },
}

pub struct WeeklyLogic;

impl WeeklyLogic {
    /// Scheduled job: bill the last completed work week before `today`.
    pub fn run(
        pool: &mut DbPool,
        cfg: &Config,
        renderer: &dyn DocumentRenderer,
        notifier: &dyn Notifier,
        today: NaiveDate,
    ) -> AppResult<WeeklyOutcome> {
        if !cfg.email_configured() {
            return Err(AppError::Config(
                "SMTP credentials missing; set mail.username/mail.password".into(),
            ));
        }

        let params = GeneratorParams::from_config(cfg)?;
        let monday = last_completed_week(today)?;
        let (rec, created) = RecordLogic::ensure_week(&pool.conn, &params, monday)?;

        if rec.submitted {
            tracing::info!(invoice = %rec.number, "weekly invoice already submitted");
            return Ok(WeeklyOutcome::AlreadySubmitted(rec));
        }

        let path = DeliveryLogic::deliver(
            &pool.conn,
            cfg,
            renderer,
            notifier,
            &rec,
            Audience::Billing,
        )?;

        let record = crate::db::queries::get_record(&pool.conn, &rec.number)?;
        Ok(WeeklyOutcome::Sent {
            record,
            path,
            created,
        })
    }
}
