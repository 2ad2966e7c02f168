//! Persistent document store
//!
//! One JSON document under a single storage key holds the folders,
//! designs, settings and choose history. Nothing is cached: every public
//! operation re-reads the document, mutates it, normalizes and writes it
//! back. Reads are therefore always fresh; concurrent writers from other
//! processes are last-write-wins, an accepted limitation of the medium.

pub mod ids;
pub mod models;
pub mod presets;

pub use models::{
    Availability, Design, DesignWithAvailability, Document, Folder, HistoryItem, NewDesign,
    RollFilter, Settings, SettingsPatch,
};

use crate::config;
use crate::storage::StorageBackend;
use serde_json::Value;
use std::sync::Arc;

/// Handle to the main document. Cheap to clone; every service holds one.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn StorageBackend>,
    key: &'static str,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            key: config::DOCUMENT_KEY,
        }
    }

    /// Seed storage on first run: a read (which falls back to the preset
    /// document) followed by a write-back of the normalized result.
    pub fn initialize(&self) {
        let doc = self.read();
        self.write(&doc);
        tracing::info!(
            "Document store ready: {} folders, {} designs",
            doc.folders.len(),
            doc.designs.len()
        );
    }

    /// Load and normalize the document.
    ///
    /// Absent storage, unreadable JSON, or a document with no designs all
    /// degrade to a fresh copy of the preset catalog. Anything else is
    /// decoded section by section, so one malformed section cannot
    /// discard the others, then normalized.
    pub fn read(&self) -> Document {
        let raw = match self.backend.get(self.key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Storage read failed, using preset document: {}", e);
                None
            }
        };

        let Some(raw) = raw else {
            return presets::default_document();
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Stored document is not valid JSON, using presets: {}", e);
                return presets::default_document();
            }
        };

        let mut doc = merge_sections(value);
        if doc.designs.is_empty() {
            return presets::default_document();
        }

        doc.normalize();
        doc
    }

    /// Serialize and persist the document. Failures are swallowed with a
    /// warning: persistence is best-effort and must never block the UI.
    pub fn write(&self, doc: &Document) {
        let json = match serde_json::to_string(doc) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize document, write skipped: {}", e);
                return;
            }
        };

        if let Err(e) = self.backend.set(self.key, &json) {
            tracing::warn!("Storage write failed, state is in-memory only: {}", e);
        }
    }

    /// One full read-modify-write cycle: read, mutate, normalize, write.
    /// Every mutating service operation goes through here so history and
    /// availability changes always land in the same write.
    pub fn mutate<T>(&self, f: impl FnOnce(&mut Document) -> T) -> T {
        let mut doc = self.read();
        let result = f(&mut doc);
        doc.normalize();
        self.write(&doc);
        result
    }
}

/// Section-tolerant decode: each field of the document falls back on its
/// own (folders/designs to the presets, settings/history to empty
/// defaults), mirroring how partial or legacy payloads are repaired.
fn merge_sections(mut value: Value) -> Document {
    let defaults = presets::default_document();

    Document {
        folders: take_section(&mut value, "folders").unwrap_or(defaults.folders),
        designs: take_section(&mut value, "designs").unwrap_or(defaults.designs),
        settings: take_section(&mut value, "settings").unwrap_or_default(),
        history: take_section(&mut value, "history").unwrap_or_default(),
    }
}

fn take_section<T: serde::de::DeserializeOwned>(value: &mut Value, field: &str) -> Option<T> {
    let section = value.get_mut(field)?.take();
    serde_json::from_value(section).ok()
}
