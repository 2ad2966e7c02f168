//! Artist PIN
//!
//! A plain numeric PIN on its own storage key, compared locally. This
//! gates the settings screens against walk-in clients; it is not
//! authentication, and it is stored in the clear on purpose.

use crate::config;
use crate::storage::StorageBackend;
use std::sync::Arc;

#[derive(Clone)]
pub struct PinService {
    backend: Arc<dyn StorageBackend>,
}

impl PinService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn digits(input: &str) -> String {
        input.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// The stored PIN, falling back to the default when unset or blank.
    pub fn get(&self) -> String {
        match self.backend.get(config::PIN_KEY) {
            Ok(Some(pin)) if !pin.trim().is_empty() => pin,
            Ok(_) => config::DEFAULT_PIN.to_string(),
            Err(e) => {
                tracing::warn!("Storage read failed for artist PIN: {}", e);
                config::DEFAULT_PIN.to_string()
            }
        }
    }

    /// Store a new PIN. Non-digits are stripped and the result truncated
    /// to [`config::PIN_MAX_DIGITS`]; input with no digits at all is
    /// ignored. The minimum-length rule lives in the PIN-entry UI.
    pub fn set(&self, pin: &str) {
        let clean: String = Self::digits(pin)
            .chars()
            .take(config::PIN_MAX_DIGITS)
            .collect();
        if clean.is_empty() {
            return;
        }

        tracing::info!("Updating artist PIN");
        if let Err(e) = self.backend.set(config::PIN_KEY, &clean) {
            tracing::warn!("Storage write failed for artist PIN: {}", e);
        }
    }

    /// Compare a candidate against the stored PIN. A mismatch is a plain
    /// `false`, never an error.
    pub fn verify(&self, candidate: &str) -> bool {
        Self::digits(candidate) == self.get()
    }
}
