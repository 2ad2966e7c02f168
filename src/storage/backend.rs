//! Storage backend abstraction
//!
//! Every persisted structure in flashroll is a JSON string under a string
//! key. The backend is injected into the stores at construction, so the
//! same services run against a file-backed station directory or a
//! throwaway in-memory map in tests.

use crate::error::Result;

/// Key/value storage medium for serialized state.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key` if present. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
