//! Subjects and HTML bodies of the two emails the workflow sends.

use crate::config::Config;
use crate::notify::{Attachment, Notification};
use crate::utils::money;

/// Asks the freelancer to review a freshly generated invoice.
pub fn approval_request(
    cfg: &Config,
    number: &str,
    amount: f64,
    hours: f64,
    attachment: Attachment,
) -> Notification {
    let recipients = cfg
        .mail
        .recipients
        .iter()
        .map(|r| format!("<li>{r}</li>"))
        .collect::<String>();

    let html_body = format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6;">
  <h2 style="color: #2c3e50;">Invoice Ready for Approval</h2>
  <div style="background: #f8f9fa; padding: 20px; border-radius: 5px; margin: 20px 0;">
    <p><strong>Invoice Number:</strong> {number}</p>
    <p><strong>Total Hours:</strong> {hours} hours</p>
    <p><strong>Total Amount:</strong> {amount}</p>
  </div>
  <p>Please review the attached invoice.</p>
  <p><strong>Next Steps:</strong></p>
  <ol>
    <li>Review the attached invoice PDF</li>
    <li>If approved, send it with <code>POST /invoice/approve/{number}</code></li>
    <li>The invoice will then be sent to:<ul>{recipients}</ul></li>
  </ol>
  <p style="color: #7f8c8d; font-size: 12px; margin-top: 40px;">
    This is an automated email from the invoice generation system.
  </p>
</body>
</html>"#,
        amount = money(amount),
    );

    Notification {
        to: vec![cfg.mail.approval_to.clone()],
        cc: cfg.mail.cc.clone(),
        subject: format!("Invoice {number} - Pending Approval"),
        html_body,
        attachment: Some(attachment),
    }
}

/// The invoice itself, addressed to the billing recipients with the sender in cc.
pub fn invoice_delivery(
    cfg: &Config,
    number: &str,
    amount: f64,
    hours: f64,
    attachment: Attachment,
) -> Notification {
    let payee = &cfg.parties.payee;
    let html_body = format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6;">
  <h2 style="color: #2c3e50;">Weekly Timesheet &amp; Invoice</h2>
  <p>Dear {payor} Team,</p>
  <p>Please find attached my weekly invoice for your review and processing.</p>
  <div style="background: #f8f9fa; padding: 20px; border-radius: 5px; margin: 20px 0;">
    <p><strong>Invoice Number:</strong> {number}</p>
    <p><strong>Total Hours Worked:</strong> {hours} hours</p>
    <p><strong>Total Amount Due:</strong> {amount}</p>
  </div>
  <p><strong>Work Summary:</strong></p>
  <ul>
    <li>Monday through Friday: {per_day} hours per day</li>
    <li>Total: {hours} hours @ {rate}/hour</li>
  </ul>
  <p>Please process this invoice according to our agreed payment terms (Net {terms}).</p>
  <p>Best regards,<br><strong>{payee}</strong><br>{from}</p>
</body>
</html>"#,
        payor = cfg.parties.payor,
        amount = money(amount),
        per_day = cfg.billing.hours_per_day,
        rate = money(cfg.billing.hourly_rate),
        terms = cfg.billing.payment_terms,
        from = cfg.mail.from,
    );

    let mut cc = vec![cfg.mail.from.clone()];
    cc.extend(cfg.mail.cc.iter().cloned());

    Notification {
        to: cfg.mail.recipients.clone(),
        cc,
        subject: format!("Weekly Invoice {number} - {payee}"),
        html_body,
        attachment: Some(attachment),
    }
}
