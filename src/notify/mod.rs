//! Email delivery of rendered documents.

pub mod mailer;
pub mod templates;

pub use mailer::{FileNotifier, SmtpNotifier};

use crate::config::{Config, MailTransport};
use crate::errors::AppResult;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A single outgoing email.
#[derive(Debug, Clone)]
pub struct Notification {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub html_body: String,
    pub attachment: Option<Attachment>,
}

/// Blocking, single-attempt delivery. No retry, no queueing: a failure is
/// returned as `AppError::Transport` and left to the caller.
pub trait Notifier: Send + Sync {
    fn send(&self, msg: &Notification) -> AppResult<()>;
}

/// Build the notifier selected by `mail.transport`.
pub fn from_config(cfg: &Config) -> AppResult<Arc<dyn Notifier>> {
    let notifier: Arc<dyn Notifier> = match cfg.mail.transport {
        MailTransport::Smtp => Arc::new(SmtpNotifier::new(&cfg.mail)?),
        MailTransport::File => Arc::new(FileNotifier::new(&cfg.mail)?),
    };
    Ok(notifier)
}
