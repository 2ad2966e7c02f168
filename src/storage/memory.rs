//! In-memory storage
//!
//! Map-backed storage used by tests and by contexts where no persistent
//! medium exists. State lasts for the lifetime of the backend instance,
//! which matches the "ephemeral defaults" degradation policy.

use super::backend::StorageBackend;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Non-persistent storage over a mutex-guarded map.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // Recover from poisoning; losing a concurrent write is already an
        // accepted outcome of the storage model.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}
