use crate::config::Config;
use crate::core::status::StatusLogic;
use crate::db::log::ttlog_soft;
use crate::errors::AppResult;
use crate::models::record::WorkRecord;
use crate::notify::{Attachment, Notification, Notifier, templates};
use crate::render::{DocumentRenderer, save_bytes};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

/// Who an invoice email is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// The freelancer, for review before the real send.
    Approval,
    /// The fixed billing/timesheet recipients.
    Billing,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Approval => "approval",
            Audience::Billing => "billing",
        }
    }
}

pub fn compose(
    cfg: &Config,
    audience: Audience,
    number: &str,
    amount: f64,
    hours: f64,
    attachment: Attachment,
) -> Notification {
    match audience {
        Audience::Approval => templates::approval_request(cfg, number, amount, hours, attachment),
        Audience::Billing => templates::invoice_delivery(cfg, number, amount, hours, attachment),
    }
}

/// Load a previously rendered document as an attachment.
pub fn attachment_from_file(path: &Path) -> AppResult<Attachment> {
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "invoice.pdf".to_string());
    Ok(Attachment { file_name, bytes })
}

pub struct DeliveryLogic;

impl DeliveryLogic {
    /// Render `rec` into the output directory and email it to `audience`.
    ///
    /// A billing send marks the record submitted once the transport accepted
    /// the message; nothing is changed when the send fails.
    pub fn deliver(
        conn: &Connection,
        cfg: &Config,
        renderer: &dyn DocumentRenderer,
        notifier: &dyn Notifier,
        rec: &WorkRecord,
        audience: Audience,
    ) -> AppResult<PathBuf> {
        let bytes = renderer.render(rec)?;
        let file_name = renderer.file_name(rec);
        let path = save_bytes(&cfg.output_path(), &file_name, &bytes)?;

        let msg = compose(
            cfg,
            audience,
            &rec.number,
            rec.total_amount,
            rec.total_hours,
            Attachment { file_name, bytes },
        );
        notifier.send(&msg)?;

        ttlog_soft(
            conn,
            "send",
            &rec.number,
            &format!("Sent to {} ({})", msg.to.join(", "), audience.as_str()),
        );

        if audience == Audience::Billing {
            StatusLogic::mark_submitted(conn, &rec.number)?;
        }

        Ok(path)
    }
}
