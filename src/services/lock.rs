//! Client lock state
//!
//! The station's turn lock, persisted as a small standalone record on
//! its own storage key. Independent of the main document and never
//! reconciled with it.

use crate::config;
use crate::storage::StorageBackend;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How a locked station is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// Anyone can flip the lock off.
    Toggle,
    /// Releasing requires the artist PIN.
    #[default]
    Pin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockState {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub mode: LockMode,
    #[serde(default = "default_lock_pin")]
    pub pin: String,
}

fn default_lock_pin() -> String {
    config::DEFAULT_PIN.to_string()
}

impl Default for LockState {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: LockMode::Pin,
            pin: default_lock_pin(),
        }
    }
}

#[derive(Clone)]
pub struct LockService {
    backend: Arc<dyn StorageBackend>,
}

impl LockService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Stored lock state. Absent or corrupt records degrade to the
    /// default; a partial record merges over the defaults field by field.
    pub fn load(&self) -> LockState {
        let raw = match self.backend.get(config::LOCK_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Storage read failed for lock state: {}", e);
                None
            }
        };

        let Some(raw) = raw else {
            return LockState::default();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Stored lock state is malformed, using default: {}", e);
            LockState::default()
        })
    }

    pub fn save(&self, state: &LockState) {
        match serde_json::to_string(state) {
            Ok(json) => {
                if let Err(e) = self.backend.set(config::LOCK_KEY, &json) {
                    tracing::warn!("Storage write failed for lock state: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize lock state: {}", e),
        }
    }
}
