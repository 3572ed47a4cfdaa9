use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use rinvoicer::core::status::StatusLogic;
use rinvoicer::db::initialize::init_db;
use rinvoicer::db::pool::DbPool;
use rinvoicer::db::queries::get_record;
use rinvoicer::notify::Notifier;
use rinvoicer::render::PdfInvoiceRenderer;
use rinvoicer::service::{AppState, build_router};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{RecordingNotifier, file_config, setup_test_db, temp_dir};

fn state(name: &str, notifier: Arc<RecordingNotifier>) -> Arc<AppState> {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).unwrap();
    init_db(&pool.conn).unwrap();

    let base = temp_dir(name);
    let cfg = file_config(&db_path, &base.join("invoices"), &base.join("outbox"));
    let notifier: Arc<dyn Notifier> = notifier;
    Arc::new(AppState::new(cfg, Arc::new(PdfInvoiceRenderer), notifier))
}

async fn call(state: &Arc<AppState>, method: &str, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = build_router(state.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn call_json(state: &Arc<AppState>, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let (status, bytes) = call(state, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root_and_health() {
    let st = state("svc_health", Arc::new(RecordingNotifier::default()));

    let (status, body) = call_json(&st, "GET", "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");
    assert_eq!(body["service"], "rinvoicer");

    let (status, body) = call_json(&st, "GET", "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["email_configured"], true);
}

#[tokio::test]
async fn test_generate_download_approve() {
    let notifier = Arc::new(RecordingNotifier::default());
    let st = state("svc_flow", notifier.clone());

    let (status, body) = call_json(
        &st,
        "POST",
        "/invoice/generate",
        r#"{"start_date": "2025-10-08"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invoice_number"], "N001");
    assert_eq!(body["status"], "pending_approval");
    assert_eq!(body["total_hours"], 40.0);
    assert_eq!(body["total_amount"], 3200.0);

    let sent = notifier.messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Invoice N001 - Pending Approval");

    let (status, body) = call_json(&st, "GET", "/invoice/list", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["invoices"][0]["invoice_number"], "N001");
    assert_eq!(body["invoices"][0]["status"], "pending_approval");

    let (status, pdf) = call(&st, "GET", "/invoice/download/N001", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(pdf.starts_with(b"%PDF"));

    let (status, body) = call_json(&st, "POST", "/invoice/approve/N001", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    let sent = notifier.messages();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].to, st.config.mail.recipients);

    let pool = DbPool::new(&st.config.database).unwrap();
    assert!(get_record(&pool.conn, "N001").unwrap().submitted);

    let (_, body) = call_json(&st, "GET", "/invoice/list", "").await;
    assert_eq!(body["invoices"][0]["status"], "approved");
    assert!(body["invoices"][0]["approved_at"].is_string());
}

#[tokio::test]
async fn test_generate_same_week_reuses_record() {
    let st = state("svc_reuse", Arc::new(RecordingNotifier::default()));

    let (_, first) = call_json(
        &st,
        "POST",
        "/invoice/generate",
        r#"{"start_date": "2025-10-06"}"#,
    )
    .await;
    let (_, second) = call_json(
        &st,
        "POST",
        "/invoice/generate",
        r#"{"start_date": "2025-10-10"}"#,
    )
    .await;
    assert_eq!(first["invoice_number"], "N001");
    assert_eq!(second["invoice_number"], "N001");

    let (_, third) = call_json(
        &st,
        "POST",
        "/invoice/generate",
        r#"{"start_date": "2025-10-13"}"#,
    )
    .await;
    assert_eq!(third["invoice_number"], "N002");
}

#[tokio::test]
async fn test_unknown_invoice_is_404() {
    let st = state("svc_404", Arc::new(RecordingNotifier::default()));

    let (status, body) = call_json(&st, "POST", "/invoice/approve/N042", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("N042"));

    let (status, _) = call_json(&st, "GET", "/invoice/download/N042", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_date_is_400() {
    let st = state("svc_bad_date", Arc::new(RecordingNotifier::default()));

    let (status, body) = call_json(
        &st,
        "POST",
        "/invoice/generate",
        r#"{"start_date": "10/08/2025"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("10/08/2025"));

    let (status, _) = call_json(&st, "POST", "/invoice/generate", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transport_failure() {
    let st = state("svc_transport", Arc::new(RecordingNotifier::failing()));

    let (status, body) = call_json(
        &st,
        "POST",
        "/invoice/generate",
        r#"{"start_date": "2025-10-08"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("failed"));

    let (status, body) = call_json(&st, "POST", "/invoice/approve/N001", "").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));

    let pool = DbPool::new(&st.config.database).unwrap();
    assert!(!get_record(&pool.conn, "N001").unwrap().submitted);

    let (_, body) = call_json(&st, "GET", "/invoice/list", "").await;
    assert_eq!(body["invoices"][0]["status"], "pending_approval");
}

#[tokio::test]
async fn test_submitted_week_is_not_billed_twice() {
    let notifier = Arc::new(RecordingNotifier::default());
    let st = state("svc_resubmit", notifier.clone());
    let week = r#"{"start_date": "2025-10-06"}"#;

    let (status, _) = call_json(&st, "POST", "/invoice/generate", week).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call_json(&st, "POST", "/invoice/approve/N001", "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call_json(&st, "POST", "/invoice/generate", week).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("N001"));

    let (_, body) = call_json(&st, "GET", "/invoice/list", "").await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["invoices"][0]["status"], "approved");

    let (status, body) = call_json(&st, "POST", "/invoice/approve/N001", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    let billed = notifier
        .messages()
        .iter()
        .filter(|m| m.to == st.config.mail.recipients)
        .count();
    assert_eq!(billed, 1);
}

#[tokio::test]
async fn test_approve_after_submission_elsewhere_is_409() {
    let notifier = Arc::new(RecordingNotifier::default());
    let st = state("svc_submitted_elsewhere", notifier.clone());

    let (status, _) = call_json(
        &st,
        "POST",
        "/invoice/generate",
        r#"{"start_date": "2025-10-06"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let pool = DbPool::new(&st.config.database).unwrap();
    StatusLogic::mark_submitted(&pool.conn, "N001").unwrap();

    let (status, _) = call_json(&st, "POST", "/invoice/approve/N001", "").await;
    assert_eq!(status, StatusCode::CONFLICT);
    // only the approval email went out
    assert_eq!(notifier.messages().len(), 1);

    let (_, body) = call_json(&st, "GET", "/invoice/list", "").await;
    assert_eq!(body["invoices"][0]["status"], "pending_approval");
}
