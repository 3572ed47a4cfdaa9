//! HTTP entry point: on-demand generation with an approval step.

pub mod error;
pub mod handlers;
pub mod pending;
pub mod state;

pub use state::AppState;

use crate::errors::{AppError, AppResult};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/invoice/generate", post(handlers::generate_handler))
        .route("/invoice/approve/{number}", post(handlers::approve_handler))
        .route("/invoice/download/{number}", get(handlers::download_handler))
        .route("/invoice/list", get(handlers::list_handler))
        .with_state(state)
}

/// Bind `bind:port` and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, bind: &str, port: u16) -> AppResult<()> {
    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("cannot bind {addr}: {e}")))?;

    tracing::info!(%addr, "invoice service listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
