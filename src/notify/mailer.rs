use crate::config::MailConfig;
use crate::errors::{AppError, AppResult};
use crate::notify::{Notification, Notifier};
use crate::utils::path::expand_tilde;
use lettre::message::header::ContentType;
use lettre::message::{Attachment as MailAttachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{FileTransport, Message, SmtpTransport, Transport};
use std::fs;

fn mailbox(addr: &str) -> AppResult<Mailbox> {
    addr.parse::<Mailbox>()
        .map_err(|e| AppError::Transport(format!("invalid address '{addr}': {e}")))
}

/// HTML body plus the optional PDF attachment.
fn build_message(from: &Mailbox, msg: &Notification) -> AppResult<Message> {
    let mut builder = Message::builder().from(from.clone()).subject(&msg.subject);
    for to in &msg.to {
        builder = builder.to(mailbox(to)?);
    }
    for cc in &msg.cc {
        builder = builder.cc(mailbox(cc)?);
    }

    let html = SinglePart::html(msg.html_body.clone());
    let built = match &msg.attachment {
        Some(att) => {
            let pdf = ContentType::parse("application/pdf")
                .map_err(|e| AppError::Transport(e.to_string()))?;
            let part = MailAttachment::new(att.file_name.clone()).body(att.bytes.clone(), pdf);
            builder.multipart(MultiPart::mixed().singlepart(html).singlepart(part))
        }
        None => builder.singlepart(html),
    };

    built.map_err(|e| AppError::Transport(e.to_string()))
}

/// STARTTLS relay with username/password authentication.
pub struct SmtpNotifier {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(cfg: &MailConfig) -> AppResult<Self> {
        let creds = Credentials::new(cfg.username.clone(), cfg.password.clone());
        let transport = SmtpTransport::starttls_relay(&cfg.smtp_host)
            .map_err(|e| AppError::Transport(format!("{}: {e}", cfg.smtp_host)))?
            .port(cfg.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: mailbox(&cfg.from)?,
        })
    }
}

impl Notifier for SmtpNotifier {
    fn send(&self, msg: &Notification) -> AppResult<()> {
        let message = build_message(&self.from, msg)?;
        self.transport
            .send(&message)
            .map_err(|e| AppError::Transport(e.to_string()))?;

        tracing::info!(subject = %msg.subject, to = ?msg.to, "email sent");
        Ok(())
    }
}

/// Writes each message as an `.eml` file into the outbox directory instead
/// of sending it.
pub struct FileNotifier {
    transport: FileTransport,
    from: Mailbox,
}

impl FileNotifier {
    pub fn new(cfg: &MailConfig) -> AppResult<Self> {
        let dir = expand_tilde(&cfg.outbox);
        fs::create_dir_all(&dir)?;

        Ok(Self {
            transport: FileTransport::new(dir),
            from: mailbox(&cfg.from)?,
        })
    }
}

impl Notifier for FileNotifier {
    fn send(&self, msg: &Notification) -> AppResult<()> {
        let message = build_message(&self.from, msg)?;
        let id = self
            .transport
            .send(&message)
            .map_err(|e| AppError::Transport(e.to_string()))?;

        tracing::info!(subject = %msg.subject, id = %id, "email written to outbox");
        Ok(())
    }
}
