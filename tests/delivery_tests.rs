use chrono::NaiveDate;
use rinvoicer::config::Config;
use rinvoicer::core::delivery::{Audience, DeliveryLogic};
use rinvoicer::core::records::RecordLogic;
use rinvoicer::core::weekly::{WeeklyLogic, WeeklyOutcome};
use rinvoicer::core::generator::GeneratorParams;
use rinvoicer::db::initialize::init_db;
use rinvoicer::db::pool::DbPool;
use rinvoicer::db::queries::get_record;
use rinvoicer::errors::AppError;
use rinvoicer::render::{DocumentRenderer, PdfInvoiceRenderer};
use rusqlite::Connection;
use std::fs;

mod common;
use common::{RecordingNotifier, file_config, temp_dir};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn memory_pool() -> DbPool {
    let conn = Connection::open_in_memory().expect("open db");
    init_db(&conn).expect("init db");
    DbPool { conn }
}

fn config(name: &str) -> Config {
    let base = temp_dir(name);
    file_config(":memory:", &base.join("invoices"), &base.join("outbox"))
}

#[test]
fn test_pdf_renderer_output() {
    let cfg = config("render_output");
    let params = GeneratorParams::from_config(&cfg).unwrap();
    let rec = rinvoicer::core::generator::build_week(&params, d("2025-10-06"), 4).unwrap();

    let bytes = PdfInvoiceRenderer.render(&rec).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(PdfInvoiceRenderer.file_name(&rec), "invoice_N004.pdf");
}

#[test]
fn test_billing_delivery_marks_submitted() {
    let cfg = config("deliver_billing");
    let mut pool = memory_pool();
    let params = GeneratorParams::from_config(&cfg).unwrap();
    RecordLogic::populate(&mut pool, &params, d("2025-10-05"), d("2025-10-12")).unwrap();

    let notifier = RecordingNotifier::default();
    let rec = get_record(&pool.conn, "N002").unwrap();
    let path = DeliveryLogic::deliver(
        &pool.conn,
        &cfg,
        &PdfInvoiceRenderer,
        &notifier,
        &rec,
        Audience::Billing,
    )
    .unwrap();

    assert!(path.ends_with("invoice_N002.pdf"));
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));

    let sent = notifier.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, cfg.mail.recipients);
    assert_eq!(sent[0].cc, vec!["jane@example.com".to_string()]);
    assert_eq!(sent[0].subject, "Weekly Invoice N002 - Jane Doe");
    let att = sent[0].attachment.as_ref().unwrap();
    assert_eq!(att.file_name, "invoice_N002.pdf");
    assert!(att.bytes.starts_with(b"%PDF"));

    assert!(get_record(&pool.conn, "N002").unwrap().submitted);
    assert!(!get_record(&pool.conn, "N001").unwrap().submitted);
}

#[test]
fn test_approval_delivery_keeps_status() {
    let cfg = config("deliver_approval");
    let mut pool = memory_pool();
    let params = GeneratorParams::from_config(&cfg).unwrap();
    RecordLogic::populate(&mut pool, &params, d("2025-10-05"), d("2025-10-05")).unwrap();

    let notifier = RecordingNotifier::default();
    let rec = get_record(&pool.conn, "N001").unwrap();
    DeliveryLogic::deliver(
        &pool.conn,
        &cfg,
        &PdfInvoiceRenderer,
        &notifier,
        &rec,
        Audience::Approval,
    )
    .unwrap();

    let sent = notifier.messages();
    assert_eq!(sent[0].to, vec!["jane@example.com".to_string()]);
    assert_eq!(sent[0].subject, "Invoice N001 - Pending Approval");
    assert!(!get_record(&pool.conn, "N001").unwrap().submitted);
}

#[test]
fn test_failed_send_changes_nothing() {
    let cfg = config("deliver_failure");
    let mut pool = memory_pool();
    let params = GeneratorParams::from_config(&cfg).unwrap();
    RecordLogic::populate(&mut pool, &params, d("2025-10-05"), d("2025-10-05")).unwrap();

    let rec = get_record(&pool.conn, "N001").unwrap();
    let err = DeliveryLogic::deliver(
        &pool.conn,
        &cfg,
        &PdfInvoiceRenderer,
        &RecordingNotifier::failing(),
        &rec,
        Audience::Billing,
    )
    .unwrap_err();

    assert!(matches!(err, AppError::Transport(_)));
    assert!(!get_record(&pool.conn, "N001").unwrap().submitted);
}

#[test]
fn test_weekly_run_sends_once() {
    let cfg = config("weekly_once");
    let mut pool = memory_pool();
    let notifier = RecordingNotifier::default();

    let outcome =
        WeeklyLogic::run(&mut pool, &cfg, &PdfInvoiceRenderer, &notifier, d("2025-10-13")).unwrap();
    match outcome {
        WeeklyOutcome::Sent {
            record, created, ..
        } => {
            assert!(created);
            assert_eq!(record.number, "N001");
            assert_eq!(record.week_start(), d("2025-10-06"));
            assert!(record.submitted);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let outcome =
        WeeklyLogic::run(&mut pool, &cfg, &PdfInvoiceRenderer, &notifier, d("2025-10-14")).unwrap();
    assert!(matches!(outcome, WeeklyOutcome::AlreadySubmitted(ref r) if r.number == "N001"));
    assert_eq!(notifier.messages().len(), 1);
}

#[test]
fn test_weekly_run_reuses_populated_week() {
    let cfg = config("weekly_reuse");
    let mut pool = memory_pool();
    let params = GeneratorParams::from_config(&cfg).unwrap();
    RecordLogic::populate(&mut pool, &params, d("2025-10-05"), d("2025-10-12")).unwrap();

    let notifier = RecordingNotifier::default();
    let outcome =
        WeeklyLogic::run(&mut pool, &cfg, &PdfInvoiceRenderer, &notifier, d("2025-10-13")).unwrap();

    match outcome {
        WeeklyOutcome::Sent {
            record, created, ..
        } => {
            assert!(!created);
            assert_eq!(record.number, "N002");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_weekly_run_requires_credentials() {
    let mut cfg = config("weekly_no_creds");
    cfg.mail.transport = rinvoicer::config::MailTransport::Smtp;
    cfg.mail.username.clear();
    cfg.mail.password.clear();

    let mut pool = memory_pool();
    let err = WeeklyLogic::run(
        &mut pool,
        &cfg,
        &PdfInvoiceRenderer,
        &RecordingNotifier::default(),
        d("2025-10-13"),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}
