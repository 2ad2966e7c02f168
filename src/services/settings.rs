//! Settings service
//!
//! Typed get/patch access to the settings sub-document. Patches are
//! shallow merges; range sanitization (clamping the reroll budget and
//! the like) is the caller's job before the patch is built.

use crate::store::{DocumentStore, Settings, SettingsPatch};

#[derive(Clone)]
pub struct SettingsService {
    store: DocumentStore,
}

impl SettingsService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Current settings, normalized.
    pub fn get(&self) -> Settings {
        self.store.read().settings
    }

    /// Shallow-merge `patch` onto the stored settings.
    pub fn update(&self, patch: SettingsPatch) {
        tracing::debug!("Updating settings: {:?}", patch);
        self.store.mutate(|doc| doc.settings.apply(patch));
    }
}
