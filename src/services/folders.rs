//! Folder registry
//!
//! CRUD over design folders. Deleting a folder cascades into design
//! membership but never deletes designs themselves.

use crate::config;
use crate::store::{ids, DocumentStore, Folder};

#[derive(Clone)]
pub struct FolderService {
    store: DocumentStore,
}

impl FolderService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Folders in storage order.
    pub fn list(&self) -> Vec<Folder> {
        self.store.read().folders
    }

    /// Create a folder at the end of the list. Blank names get a
    /// placeholder.
    pub fn add(&self, name: &str) -> Folder {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            config::FOLDER_NAME_PLACEHOLDER
        } else {
            trimmed
        };

        let folder = Folder {
            id: ids::next_id(),
            name: name.to_string(),
        };
        tracing::info!("Adding folder: {} ({})", folder.name, folder.id);

        self.store.mutate(|doc| doc.folders.push(folder.clone()));
        folder
    }

    /// Delete a folder and strip it from every design's membership.
    ///
    /// Callers must not pass the reserved "Unsorted" folder; the registry
    /// does not re-check the name here, and normalization recreates an
    /// "Unsorted" folder on the next read if it ever disappears.
    pub fn delete(&self, id: i64) {
        tracing::info!("Deleting folder: {}", id);

        self.store.mutate(|doc| {
            doc.folders.retain(|f| f.id != id);

            for design in &mut doc.designs {
                design.folder_ids.retain(|&f| f != id);
                // Re-derive the primary mirror now, before normalization
                // runs, or a stale mirror would fold the deleted id back
                // into the membership list.
                design.folder_id = design.folder_ids.first().copied();
            }
        });
    }
}
