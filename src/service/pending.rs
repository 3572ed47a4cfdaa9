//! Documents generated through the service and waiting for approval.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingStatus {
    PendingApproval,
    Approved,
}

#[derive(Debug, Clone)]
pub struct PendingItem {
    pub number: String,
    pub path: PathBuf,
    pub total_hours: f64,
    pub total_amount: f64,
    pub generated_at: DateTime<Local>,
    pub status: PendingStatus,
    pub approved_at: Option<DateTime<Local>>,
}

/// Process-scoped map from invoice number to its pending item. Nothing here
/// survives a restart; the record store stays the source of truth.
#[derive(Debug, Default)]
pub struct PendingStore {
    items: Mutex<HashMap<String, PendingItem>>,
}

impl PendingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, PendingItem>> {
        self.items.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Register (or replace) the item for `item.number`.
    pub fn insert(&self, item: PendingItem) {
        self.lock().insert(item.number.clone(), item);
    }

    pub fn get(&self, number: &str) -> Option<PendingItem> {
        self.lock().get(number).cloned()
    }

    /// Flip an item to approved. Returns false if it is unknown.
    pub fn mark_approved(&self, number: &str) -> bool {
        match self.lock().get_mut(number) {
            Some(item) => {
                item.status = PendingStatus::Approved;
                item.approved_at = Some(Local::now());
                true
            }
            None => false,
        }
    }

    /// All items, ordered by invoice number.
    pub fn list(&self) -> Vec<PendingItem> {
        let mut items: Vec<PendingItem> = self.lock().values().cloned().collect();
        items.sort_by(|a, b| a.number.cmp(&b.number));
        items
    }
}
