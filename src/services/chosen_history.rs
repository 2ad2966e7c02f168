//! Chosen-design log
//!
//! A separately-keyed append log with its own record shape, used by the
//! reveal screen. It is independent of the main document's history and
//! the two are never reconciled. Older builds stored this log under
//! several keys and shapes; loading runs a one-shot migration that
//! imports the first legacy key with usable content and removes it.

use crate::config;
use crate::storage::StorageBackend;
use crate::store::ids;
use crate::store::Design;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// One chosen-design record. String ids and the optional timestamp
/// predate the integer ids of the main document; the shape is kept so
/// existing stored data stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChosenRecord {
    pub id: String,
    pub design_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    /// Unix milliseconds; `None` for imported entries that carried no
    /// usable timestamp.
    pub chosen_at: Option<i64>,
}

// Field aliases scanned in priority order when normalizing a raw entry.
// First alias whose value survives its transform wins.
const DESIGN_ID_ALIASES: &[&str] = &["designId", "designID", "design", "design_id", "id"];
const TITLE_ALIASES: &[&str] = &["title", "name", "designName"];
const IMAGE_URI_ALIASES: &[&str] = &["imageUri", "uri", "image", "imageURL", "imageUrl"];
const CHOSEN_AT_ALIASES: &[&str] = &["chosenAt", "timestamp", "timeStamp", "createdAt", "created_at"];

fn first_match<T>(
    obj: &Map<String, Value>,
    aliases: &[&str],
    transform: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    aliases.iter().find_map(|alias| obj.get(*alias).and_then(&transform))
}

/// Strings pass through, numbers are rendered; empty strings don't count
/// as ids.
fn as_id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Accepts a unix-ms number or a numeric string.
fn as_unix_ms(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn new_record_id() -> String {
    format!("hist-{}-{:08x}", ids::now_ms(), rand::random::<u32>())
}

/// Normalize one raw entry. The oldest builds stored bare design-id
/// strings; object entries go through the alias tables. Entries with no
/// recoverable design id are dropped.
fn normalize_entry(entry: &Value, index: usize) -> Option<ChosenRecord> {
    if let Value::String(design_id) = entry {
        return Some(ChosenRecord {
            id: format!("legacy-{}-{}", index, design_id),
            design_id: design_id.clone(),
            title: None,
            image_uri: None,
            chosen_at: None,
        });
    }

    let obj = entry.as_object()?;
    let design_id = first_match(obj, DESIGN_ID_ALIASES, as_id_string)?;

    Some(ChosenRecord {
        id: obj
            .get("id")
            .and_then(as_id_string)
            .unwrap_or_else(new_record_id),
        design_id,
        title: first_match(obj, TITLE_ALIASES, as_text),
        image_uri: first_match(obj, IMAGE_URI_ALIASES, as_text),
        chosen_at: first_match(obj, CHOSEN_AT_ALIASES, as_unix_ms),
    })
}

/// Normalize a raw payload into records. Non-array payloads yield an
/// empty log.
pub fn normalize_records(raw: &Value) -> Vec<ChosenRecord> {
    let Some(entries) = raw.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| normalize_entry(entry, index))
        .collect()
}

#[derive(Clone)]
pub struct ChosenHistoryService {
    backend: Arc<dyn StorageBackend>,
}

impl ChosenHistoryService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn get_value(&self, key: &str) -> Option<Value> {
        match self.backend.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Storage read failed for chosen history: {}", e);
                None
            }
        }
    }

    /// Import the first legacy key holding records, but only while the
    /// current key is still empty. Runs once per legacy key: the imported
    /// data is persisted under the current key and the legacy key is
    /// removed so it cannot be double-imported later.
    fn migrate_legacy(&self) {
        if let Some(existing) = self.get_value(config::CHOSEN_HISTORY_KEY) {
            if !normalize_records(&existing).is_empty() {
                return;
            }
        }

        for key in config::LEGACY_CHOSEN_HISTORY_KEYS {
            let Some(raw) = self.get_value(key) else {
                continue;
            };
            let records = normalize_records(&raw);
            if records.is_empty() {
                continue;
            }

            tracing::info!(
                "Migrating {} chosen-history records from legacy key: {}",
                records.len(),
                key
            );
            self.save(&records);
            if let Err(e) = self.backend.remove(key) {
                tracing::warn!("Failed to remove legacy key {}: {}", key, e);
            }
            return;
        }
    }

    /// All records, newest first, after legacy migration.
    pub fn load(&self) -> Vec<ChosenRecord> {
        self.migrate_legacy();
        match self.get_value(config::CHOSEN_HISTORY_KEY) {
            Some(raw) => normalize_records(&raw),
            None => Vec::new(),
        }
    }

    pub fn save(&self, records: &[ChosenRecord]) {
        match serde_json::to_string(records) {
            Ok(json) => {
                if let Err(e) = self.backend.set(config::CHOSEN_HISTORY_KEY, &json) {
                    tracing::warn!("Storage write failed for chosen history: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize chosen history: {}", e),
        }
    }

    /// Prepend a record for `design`, capped at the newest
    /// [`config::CHOSEN_HISTORY_CAP`] entries.
    pub fn add(&self, design: &Design) -> Vec<ChosenRecord> {
        let mut records = self.load();
        records.insert(
            0,
            ChosenRecord {
                id: new_record_id(),
                design_id: design.id.to_string(),
                title: Some(design.name.clone()),
                image_uri: design.image_uri.clone(),
                chosen_at: Some(ids::now_ms()),
            },
        );
        records.truncate(config::CHOSEN_HISTORY_CAP);
        self.save(&records);
        records
    }

    /// Drop the log entirely.
    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(config::CHOSEN_HISTORY_KEY) {
            tracing::warn!("Failed to clear chosen history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use serde_json::json;

    fn create_test_service() -> (ChosenHistoryService, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        (ChosenHistoryService::new(backend.clone()), backend)
    }

    fn sample_design() -> Design {
        Design {
            id: 101,
            name: "Anchor".to_string(),
            image_uri: Some("data:image/svg+xml,anchor".to_string()),
            folder_ids: vec![5],
            folder_id: Some(5),
            used_in_session: false,
            used_globally: false,
        }
    }

    #[test]
    fn test_design_id_alias_priority() {
        let entry = json!({"design_id": "7", "id": "9"});

        let record = normalize_entry(&entry, 0).unwrap();

        // design_id outranks id in the alias table.
        assert_eq!(record.design_id, "7");
        assert_eq!(record.id, "9");
    }

    #[test]
    fn test_numeric_design_id_is_rendered() {
        let entry = json!({"designId": 42, "name": "Skull"});

        let record = normalize_entry(&entry, 0).unwrap();

        assert_eq!(record.design_id, "42");
        assert_eq!(record.title.as_deref(), Some("Skull"));
    }

    #[test]
    fn test_timestamp_aliases_accept_numeric_strings() {
        let entry = json!({"id": "a", "designId": "1", "createdAt": "1700000000000"});

        let record = normalize_entry(&entry, 0).unwrap();

        assert_eq!(record.chosen_at, Some(1_700_000_000_000));
    }

    #[test]
    fn test_unparsable_timestamp_becomes_none() {
        let entry = json!({"designId": "1", "timestamp": "yesterday"});

        let record = normalize_entry(&entry, 0).unwrap();

        assert_eq!(record.chosen_at, None);
    }

    #[test]
    fn test_image_alias_order() {
        let entry = json!({"designId": "1", "image": "b.png", "imageUri": "a.png"});

        let record = normalize_entry(&entry, 0).unwrap();

        assert_eq!(record.image_uri.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_bare_string_entries_become_legacy_records() {
        let records = normalize_records(&json!(["101", "102"]));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "legacy-0-101");
        assert_eq!(records[0].design_id, "101");
        assert_eq!(records[0].chosen_at, None);
    }

    #[test]
    fn test_entries_without_design_id_are_dropped() {
        let records = normalize_records(&json!([{"title": "orphan"}, {"designId": "1"}]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].design_id, "1");
    }

    #[test]
    fn test_non_array_payload_is_empty() {
        assert!(normalize_records(&json!({"oops": true})).is_empty());
        assert!(normalize_records(&json!("101")).is_empty());
    }

    #[test]
    fn test_add_prepends_and_caps() {
        let (service, _backend) = create_test_service();
        let design = sample_design();

        for _ in 0..(config::CHOSEN_HISTORY_CAP + 5) {
            service.add(&design);
        }

        let records = service.load();
        assert_eq!(records.len(), config::CHOSEN_HISTORY_CAP);
        assert_eq!(records[0].design_id, "101");
        assert_eq!(records[0].title.as_deref(), Some("Anchor"));
    }

    #[test]
    fn test_legacy_key_is_imported_once_and_removed() {
        let (service, backend) = create_test_service();

        backend
            .set(
                "chosenHistory",
                r#"[{"design": "9", "designName": "Old Rose", "timeStamp": 1600000000000}]"#,
            )
            .unwrap();

        let records = service.load();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].design_id, "9");
        assert_eq!(records[0].title.as_deref(), Some("Old Rose"));
        assert_eq!(records[0].chosen_at, Some(1_600_000_000_000));

        // Legacy key gone; current key holds the data.
        assert!(backend.get("chosenHistory").unwrap().is_none());
        assert!(backend.get(config::CHOSEN_HISTORY_KEY).unwrap().is_some());
    }

    #[test]
    fn test_existing_data_blocks_migration() {
        let (service, backend) = create_test_service();

        service.add(&sample_design());
        backend.set("chosenHistory", r#"["999"]"#).unwrap();

        let records = service.load();
        assert!(records.iter().all(|r| r.design_id != "999"));
        // Untouched legacy key: migration only runs against an empty log.
        assert!(backend.get("chosenHistory").unwrap().is_some());
    }

    #[test]
    fn test_legacy_keys_scanned_in_order() {
        let (service, backend) = create_test_service();

        backend.set("CHOSEN_HISTORY", r#"["2"]"#).unwrap();
        backend.set("chosenHistory", r#"["1"]"#).unwrap();

        let records = service.load();
        assert_eq!(records[0].design_id, "1");
        // Only the imported key is removed.
        assert!(backend.get("chosenHistory").unwrap().is_none());
        assert!(backend.get("CHOSEN_HISTORY").unwrap().is_some());
    }

    #[test]
    fn test_clear_removes_key() {
        let (service, backend) = create_test_service();

        service.add(&sample_design());
        service.clear();

        assert!(backend.get(config::CHOSEN_HISTORY_KEY).unwrap().is_none());
        assert!(service.load().is_empty());
    }
}
