//! History log
//!
//! Read/clear access to the document's choose history. Entries are
//! written by the design catalog's choose transaction; this service
//! never appends on its own.

use crate::config;
use crate::store::{DocumentStore, HistoryItem};

#[derive(Clone)]
pub struct HistoryService {
    store: DocumentStore,
}

impl HistoryService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Most recent entries, newest first, truncated to `limit`.
    pub fn list(&self, limit: usize) -> Vec<HistoryItem> {
        let mut items = self.store.read().history;
        items.sort_by(|a, b| b.chosen_at.cmp(&a.chosen_at));
        items.truncate(limit);
        items
    }

    /// The default page of recent entries.
    pub fn list_recent(&self) -> Vec<HistoryItem> {
        self.list(config::HISTORY_LIST_LIMIT)
    }

    /// Drop every history entry. Designs, folders and settings are
    /// untouched.
    pub fn clear(&self) {
        tracing::info!("Clearing choose history");
        self.store.mutate(|doc| doc.history.clear());
    }
}
