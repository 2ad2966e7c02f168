//! File-backed storage
//!
//! Stores each key as one JSON file under a root directory.
//! Writes go to a temp file first and are renamed into place, so a
//! crash mid-write leaves the previous value intact.

use super::backend::StorageBackend;
use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// One-file-per-key storage rooted at a directory.
#[derive(Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a new file backend at the given root directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Initialize the backend (create the root directory if needed).
    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        tracing::info!("File storage initialized at: {:?}", self.root);
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path)?;
        tracing::debug!("Read key: {} ({} bytes)", key, value.len());
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        let path = self.path_for(key);

        // Write to temp file first (atomic write)
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;

        // Rename to final location
        fs::rename(temp_path, &path)?;

        tracing::debug!("Wrote key: {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(()); // Already removed
        }

        fs::remove_file(&path)?;
        tracing::debug!("Removed key: {}", key);
        Ok(())
    }
}
