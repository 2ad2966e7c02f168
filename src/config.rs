//! Application configuration constants
//!
//! Central location for storage keys, retention caps, and validation
//! boundaries used throughout the application.

// ===== Storage Keys =====

/// Key holding the main document (folders, designs, settings, history).
pub const DOCUMENT_KEY: &str = "FLASHROLL_DB_V1";

/// Key holding the client-lock record for the station screen.
pub const LOCK_KEY: &str = "flashroll-client-lock";

/// Key holding the artist PIN (plain digits).
pub const PIN_KEY: &str = "flashroll_artist_pin";

/// Key holding the separately-shaped chosen-design log. The `_V1` suffix
/// is the schema version; bump it when the record shape changes and add
/// the old key to `LEGACY_CHOSEN_HISTORY_KEYS`.
pub const CHOSEN_HISTORY_KEY: &str = "FLASHROLL_CHOSEN_HISTORY_V1";

/// Keys older builds stored the chosen-design log under, scanned in order
/// on first load. The first key with usable content is imported and then
/// removed.
pub const LEGACY_CHOSEN_HISTORY_KEYS: &[&str] = &[
    "chosenHistory",
    "CHOSEN_HISTORY",
    "FLASHROLL_CHOSEN_HISTORY",
    "FLASHROLL_HISTORY",
    "history",
];

// ===== Retention Caps =====

/// Maximum entries kept in the document's choose history.
/// Inserts prepend, so eviction is oldest-first.
pub const HISTORY_CAP: usize = 300;

/// Default page size for history listings.
pub const HISTORY_LIST_LIMIT: usize = 50;

/// Maximum entries kept in the separately-keyed chosen-design log.
pub const CHOSEN_HISTORY_CAP: usize = 200;

// ===== PIN Limits =====

/// Maximum PIN length in digits; longer input is truncated on save.
pub const PIN_MAX_DIGITS: usize = 8;

/// Minimum PIN length in digits. Enforced by PIN-entry UIs, not by the
/// store, which only rejects input with no digits at all.
pub const PIN_MIN_DIGITS: usize = 4;

/// PIN used until an artist sets their own.
pub const DEFAULT_PIN: &str = "1234";

// ===== Naming =====

/// Name of the reserved folder that always exists (case-insensitive
/// match) and must never be offered for deletion.
pub const UNSORTED_FOLDER_NAME: &str = "Unsorted";

/// Substitute for a blank folder name.
pub const FOLDER_NAME_PLACEHOLDER: &str = "New Folder";

/// Substitute for a blank design name.
pub const DESIGN_NAME_PLACEHOLDER: &str = "Untitled";
