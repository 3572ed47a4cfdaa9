//! HTTP handlers. Store, render and mail work is blocking and always runs on
//! the blocking pool; no connection is held across an await.

use crate::core::delivery::{Audience, attachment_from_file, compose};
use crate::core::generator::{GeneratorParams, last_completed_week};
use crate::core::records::RecordLogic;
use crate::core::status::StatusLogic;
use crate::db::log::ttlog_soft;
use crate::db::queries::get_record;
use crate::errors::{AppError, AppResult};
use crate::models::record::WorkRecord;
use crate::render::write_document;
use crate::service::error::{ApiError, ApiResult};
use crate::service::pending::{PendingItem, PendingStatus};
use crate::service::state::AppState;
use crate::utils::date;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Local;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;

async fn blocking<T, F>(f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    let out = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Other(format!("blocking task failed: {e}")))?;
    Ok(out?)
}

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "operational",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Local::now().to_rfc3339(),
        "email_configured": state.config.email_configured(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub start_date: Option<String>,
}

/// POST /invoice/generate
///
/// Generates (or reuses) the record for the requested week, renders it, keeps
/// it pending and mails it to the approval address. A failed approval email
/// is reported in `message` and does not fail the request. A week that was
/// already submitted is a conflict and leaves the pending store untouched.
pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let req: GenerateRequest = if body.iter().all(u8::is_ascii_whitespace) {
        GenerateRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("invalid JSON body: {e}")))?
    };

    let monday = match req.start_date.as_deref() {
        Some(raw) => {
            let d = date::parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string()))?;
            date::monday_of(d)?
        }
        None => last_completed_week(date::today())?,
    };

    let st = state.clone();
    let (rec, path) = blocking(move || -> AppResult<(WorkRecord, PathBuf)> {
        let pool = st.open_db()?;
        let params = GeneratorParams::from_config(&st.config)?;
        let (rec, _) = RecordLogic::ensure_week(&pool.conn, &params, monday)?;
        if rec.submitted {
            return Err(AppError::InvalidTransition(format!(
                "invoice {} was already submitted",
                rec.number
            )));
        }
        let path = write_document(st.renderer.as_ref(), &rec, &st.config.output_path())?;
        Ok((rec, path))
    })
    .await?;

    state.pending.insert(PendingItem {
        number: rec.number.clone(),
        path: path.clone(),
        total_hours: rec.total_hours,
        total_amount: rec.total_amount,
        generated_at: Local::now(),
        status: PendingStatus::PendingApproval,
        approved_at: None,
    });
    tracing::info!(invoice = %rec.number, path = %path.display(), "invoice pending approval");

    let message = if state.config.email_configured() {
        let st = state.clone();
        let number = rec.number.clone();
        let (amount, hours) = (rec.total_amount, rec.total_hours);
        let attachment_path = path.clone();
        let sent = blocking(move || {
            let attachment = attachment_from_file(&attachment_path)?;
            let msg = compose(&st.config, Audience::Approval, &number, amount, hours, attachment);
            st.notifier.send(&msg)
        })
        .await;

        match sent {
            Ok(()) => format!(
                "Invoice generated. Approval email sent to {}",
                state.config.mail.approval_to
            ),
            Err(e) => {
                tracing::warn!(invoice = %rec.number, error = %e.message, "approval email failed");
                format!("Invoice generated, but the approval email failed: {}", e.message)
            }
        }
    } else {
        format!(
            "Invoice generated. Email is not configured; download it from /invoice/download/{}",
            rec.number
        )
    };

    Ok(Json(json!({
        "invoice_number": rec.number,
        "invoice_path": path.to_string_lossy(),
        "total_hours": rec.total_hours,
        "total_amount": rec.total_amount,
        "status": "pending_approval",
        "message": message,
    })))
}

/// POST /invoice/approve/{number}
pub async fn approve_handler(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> ApiResult<Json<Value>> {
    let item = state
        .pending
        .get(&number)
        .ok_or_else(|| AppError::NotFound(number.clone()))?;

    if item.status == PendingStatus::Approved {
        return Ok(Json(json!({
            "invoice_number": number,
            "status": "approved",
            "message": "Invoice was already approved and sent",
        })));
    }

    let st = state.clone();
    let n = number.clone();
    let recipients = blocking(move || {
        let pool = st.open_db()?;
        if get_record(&pool.conn, &n)?.submitted {
            return Err(AppError::InvalidTransition(format!(
                "invoice {n} was already submitted"
            )));
        }

        let attachment = attachment_from_file(&item.path)?;
        let msg = compose(
            &st.config,
            Audience::Billing,
            &n,
            item.total_amount,
            item.total_hours,
            attachment,
        );
        st.notifier.send(&msg)?;

        ttlog_soft(
            &pool.conn,
            "send",
            &n,
            &format!("Sent to {} (billing)", msg.to.join(", ")),
        );
        StatusLogic::mark_submitted(&pool.conn, &n)?;
        Ok(msg.to)
    })
    .await?;

    state.pending.mark_approved(&number);
    tracing::info!(invoice = %number, "invoice approved and sent");

    Ok(Json(json!({
        "invoice_number": number,
        "status": "approved",
        "message": format!("Invoice sent to {}", recipients.join(", ")),
    })))
}

/// GET /invoice/download/{number}
pub async fn download_handler(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> ApiResult<Response> {
    let item = state
        .pending
        .get(&number)
        .ok_or_else(|| AppError::NotFound(number.clone()))?;

    let bytes = tokio::fs::read(&item.path)
        .await
        .map_err(|_| AppError::NotFound(number.clone()))?;

    let file_name = item
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| format!("invoice_{number}.pdf"));

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// GET /invoice/list
pub async fn list_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    let invoices: Vec<Value> = state
        .pending
        .list()
        .into_iter()
        .map(|item| {
            json!({
                "invoice_number": item.number,
                "amount": item.total_amount,
                "hours": item.total_hours,
                "generated_at": item.generated_at.to_rfc3339(),
                "status": item.status,
                "approved_at": item.approved_at.map(|t| t.to_rfc3339()),
            })
        })
        .collect();

    Json(json!({
        "count": invoices.len(),
        "invoices": invoices,
    }))
}
