//! Document models
//!
//! Rust structs for everything persisted in the main document, plus the
//! request/response types used by the services. Wire names are camelCase
//! and every optional field carries a serde default, so partial or legacy
//! JSON merges over defaults at parse time instead of failing.

use crate::config;
use serde::{Deserialize, Serialize};

/// A design folder. Folders only carry a name; membership lives on the
/// designs themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: i64,
    pub name: String,
}

/// A tattoo design in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    /// Multi-folder membership; the first entry is the primary folder.
    /// Empty membership means "Unsorted" by convention at query time.
    #[serde(default)]
    pub folder_ids: Vec<i64>,
    /// Legacy mirror of the primary folder. Re-derived on every
    /// normalization pass, never trusted from storage.
    #[serde(default)]
    pub folder_id: Option<i64>,
    #[serde(default)]
    pub used_in_session: bool,
    #[serde(default)]
    pub used_globally: bool,
}

impl Design {
    /// Whether this design is currently roll-eligible, given the
    /// repeat-allowance setting. Derived at read time, never persisted.
    pub fn is_available(&self, allow_repeats: bool) -> bool {
        !self.used_in_session && (allow_repeats || !self.used_globally)
    }
}

/// Three-way folder scope used by roll filtering and list queries.
///
/// On the wire this is the optional `defaultRollFolderId` field: an
/// absent field means every folder, JSON `null` means unsorted-only
/// (designs with no membership), and a number targets one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollFilter {
    #[default]
    All,
    Unsorted,
    Folder(i64),
}

impl RollFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, RollFilter::All)
    }

    /// Whether a design falls inside this scope.
    pub fn matches(&self, design: &Design) -> bool {
        match self {
            RollFilter::All => true,
            RollFilter::Unsorted => design.folder_ids.is_empty(),
            RollFilter::Folder(id) => design.folder_ids.contains(id),
        }
    }
}

/// Wire form of [`RollFilter`]: `All` is an absent field (handled by
/// `default` + `skip_serializing_if`), `Unsorted` is `null`, `Folder` is
/// the folder id.
mod roll_filter_wire {
    use super::RollFilter;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(filter: &RollFilter, serializer: S) -> Result<S::Ok, S::Error> {
        match filter {
            RollFilter::Folder(id) => serializer.serialize_i64(*id),
            _ => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RollFilter, D::Error> {
        Ok(match Option::<i64>::deserialize(deserializer)? {
            Some(id) => RollFilter::Folder(id),
            None => RollFilter::Unsorted,
        })
    }
}

/// Station settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// How many re-rolls a client gets after the first roll.
    #[serde(default = "default_rerolls")]
    pub rerolls: u32,
    #[serde(
        default,
        skip_serializing_if = "RollFilter::is_all",
        serialize_with = "roll_filter_wire::serialize",
        deserialize_with = "roll_filter_wire::deserialize"
    )]
    pub default_roll_folder_id: RollFilter,
    /// When true, choosing a design only removes it for the current
    /// session instead of retiring it.
    #[serde(default)]
    pub allow_repeats: bool,
}

fn default_rerolls() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rerolls: default_rerolls(),
            default_roll_folder_id: RollFilter::All,
            allow_repeats: false,
        }
    }
}

impl Settings {
    /// Shallow merge: fields present in the patch win, everything else is
    /// kept as stored.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(rerolls) = patch.rerolls {
            self.rerolls = rerolls;
        }
        if let Some(filter) = patch.default_roll_folder_id {
            self.default_roll_folder_id = filter;
        }
        if let Some(allow_repeats) = patch.allow_repeats {
            self.allow_repeats = allow_repeats;
        }
    }
}

/// Partial settings update. `None` fields are left untouched. No range
/// validation happens here; callers clamp (e.g. the reroll budget) before
/// building the patch.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub rerolls: Option<u32>,
    pub default_roll_folder_id: Option<RollFilter>,
    pub allow_repeats: Option<bool>,
}

/// One entry in the document's choose history. Captures the design's
/// name and image at choose time, so later edits don't rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: i64,
    pub design_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    /// Unix milliseconds.
    pub chosen_at: i64,
}

/// The aggregate persisted under the document key. Always read, mutated,
/// normalized and written back as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub designs: Vec<Design>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

impl Document {
    /// Defaulting/reconciliation pass applied on every read before use
    /// and on every write. Idempotent.
    ///
    /// - Guarantees a folder named "Unsorted" exists (case-insensitive),
    ///   unshifting one to the front if absent.
    /// - Folds a stored legacy `folder_id` into `folder_ids` when it is
    ///   missing there, then re-derives `folder_id` from the front of
    ///   `folder_ids`.
    pub fn normalize(&mut self) {
        if !self
            .folders
            .iter()
            .any(|f| f.name.eq_ignore_ascii_case(config::UNSORTED_FOLDER_NAME))
        {
            self.folders.insert(
                0,
                Folder {
                    id: 1,
                    name: config::UNSORTED_FOLDER_NAME.to_string(),
                },
            );
        }

        for design in &mut self.designs {
            if let Some(legacy) = design.folder_id {
                if !design.folder_ids.contains(&legacy) {
                    design.folder_ids.push(legacy);
                }
            }
            design.folder_id = design.folder_ids.first().copied();
        }
    }
}

/// Create-design request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDesign {
    pub name: String,
    #[serde(default)]
    pub image_uri: Option<String>,
    /// Initial folder membership; `None` leaves the design unsorted.
    #[serde(default)]
    pub folder_id: Option<i64>,
}

/// Explicit availability override for a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Clear both used flags; the design re-enters every pool.
    Available,
    /// Set both used flags; the design is retired regardless of the
    /// repeat-allowance setting.
    Retired,
}

/// A design plus its derived availability flag, as returned by catalog
/// listings. `is_available` is computed per call and never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignWithAvailability {
    #[serde(flatten)]
    pub design: Design,
    /// 1 when roll-eligible, 0 otherwise.
    pub is_available: u8,
}
