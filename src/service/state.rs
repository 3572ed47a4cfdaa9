use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::notify::Notifier;
use crate::render::DocumentRenderer;
use crate::service::pending::PendingStore;
use std::sync::Arc;

/// Shared state, passed as `Arc<AppState>` to every handler.
pub struct AppState {
    pub config: Config,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub notifier: Arc<dyn Notifier>,
    pub pending: PendingStore,
}

impl AppState {
    pub fn new(
        config: Config,
        renderer: Arc<dyn DocumentRenderer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            renderer,
            notifier,
            pending: PendingStore::new(),
        }
    }

    /// Fresh connection for one request. Only call from blocking context.
    pub fn open_db(&self) -> AppResult<DbPool> {
        Ok(DbPool::new(&self.config.database)?)
    }
}
