//! Design catalog and availability engine
//!
//! CRUD over designs, multi-folder membership, the roll-eligible pool,
//! and the choose transaction that writes history and availability flags
//! in the same read-modify-write cycle.

use crate::config;
use crate::store::{
    ids, Availability, Design, DesignWithAvailability, Document, DocumentStore, HistoryItem,
    NewDesign, RollFilter,
};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone)]
pub struct DesignService {
    store: DocumentStore,
}

impl DesignService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// All designs in the given scope, with derived availability.
    pub fn list_all(&self, filter: RollFilter) -> Vec<DesignWithAvailability> {
        let doc = self.store.read();
        let allow_repeats = doc.settings.allow_repeats;

        doc.designs
            .into_iter()
            .filter(|d| filter.matches(d))
            .map(|design| {
                let is_available = design.is_available(allow_repeats) as u8;
                DesignWithAvailability {
                    design,
                    is_available,
                }
            })
            .collect()
    }

    /// Create a design. Blank names get a placeholder; the design starts
    /// fully available.
    pub fn add(&self, new: NewDesign) {
        let trimmed = new.name.trim();
        let name = if trimmed.is_empty() {
            config::DESIGN_NAME_PLACEHOLDER
        } else {
            trimmed
        };

        let folder_ids: Vec<i64> = new.folder_id.into_iter().collect();
        let design = Design {
            id: ids::next_id(),
            name: name.to_string(),
            image_uri: new.image_uri,
            folder_id: folder_ids.first().copied(),
            folder_ids,
            used_in_session: false,
            used_globally: false,
        };
        tracing::info!("Adding design: {} ({})", design.name, design.id);

        self.store.mutate(|doc| doc.designs.push(design));
    }

    /// Remove a design entirely. History entries that captured it keep
    /// their snapshot of its name and image.
    pub fn delete(&self, design_id: i64) {
        tracing::info!("Deleting design: {}", design_id);
        self.store
            .mutate(|doc| doc.designs.retain(|d| d.id != design_id));
    }

    /// Force a design's availability, independent of the repeat setting.
    pub fn set_availability(&self, design_id: i64, availability: Availability) {
        tracing::info!("Setting design {} to {:?}", design_id, availability);

        self.store.mutate(|doc| {
            if let Some(design) = doc.designs.iter_mut().find(|d| d.id == design_id) {
                match availability {
                    Availability::Available => {
                        design.used_in_session = false;
                        design.used_globally = false;
                    }
                    Availability::Retired => {
                        design.used_in_session = true;
                        design.used_globally = true;
                    }
                }
            }
        });
    }

    /// Replace a design's primary folder. `None` clears every membership;
    /// `Some` ensures membership, prepending (and so making primary) when
    /// the design was not already a member.
    pub fn set_folder(&self, design_id: i64, folder_id: Option<i64>) {
        self.store.mutate(|doc| {
            if let Some(design) = doc.designs.iter_mut().find(|d| d.id == design_id) {
                match folder_id {
                    None => design.folder_ids.clear(),
                    Some(folder_id) => {
                        if !design.folder_ids.contains(&folder_id) {
                            design.folder_ids.insert(0, folder_id);
                        }
                    }
                }
                design.folder_id = design.folder_ids.first().copied();
            }
        });
    }

    /// Toggle membership of `folder_id` on a design. Adding appends;
    /// removing may change the primary folder.
    pub fn toggle_folder(&self, design_id: i64, folder_id: i64) {
        self.store.mutate(|doc| {
            if let Some(design) = doc.designs.iter_mut().find(|d| d.id == design_id) {
                if let Some(pos) = design.folder_ids.iter().position(|&f| f == folder_id) {
                    design.folder_ids.remove(pos);
                } else {
                    design.folder_ids.push(folder_id);
                }
                design.folder_id = design.folder_ids.first().copied();
            }
        });
    }

    /// The roll-eligible pool: the default roll scope from settings,
    /// intersected with per-design availability.
    pub fn list_available(&self) -> Vec<Design> {
        available_in(&self.store.read())
    }

    /// Uniform random draw from the current pool. An empty pool is the
    /// valid "no design selected" outcome, not an error. Rolling never
    /// mutates state; only [`choose`](Self::choose) does.
    pub fn roll(&self) -> Option<Design> {
        self.roll_with(&mut rand::thread_rng())
    }

    /// Roll with a caller-supplied RNG, for deterministic tests.
    pub fn roll_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Design> {
        let pool = self.list_available();
        let picked = pool.choose(rng).cloned();

        match &picked {
            Some(design) => tracing::debug!("Rolled design: {} ({})", design.name, design.id),
            None => tracing::debug!("Roll found an empty pool"),
        }
        picked
    }

    /// Lock in a chosen design.
    ///
    /// The history append and the availability flags land in the same
    /// read-modify-write cycle, so an interruption can never leave the
    /// history out of sync with the pool. `used_globally` is only set
    /// when repeats are disallowed at choose time.
    pub fn choose(&self, design_id: i64) {
        tracing::info!("Choosing design: {}", design_id);

        self.store.mutate(|doc| {
            let allow_repeats = doc.settings.allow_repeats;

            if let Some(picked) = doc.designs.iter().find(|d| d.id == design_id) {
                let item = HistoryItem {
                    id: ids::next_id(),
                    design_id: picked.id,
                    name: picked.name.clone(),
                    image_uri: picked.image_uri.clone(),
                    chosen_at: ids::now_ms(),
                };
                doc.history.insert(0, item);
                doc.history.truncate(config::HISTORY_CAP);
            }

            if let Some(design) = doc.designs.iter_mut().find(|d| d.id == design_id) {
                design.used_in_session = true;
                if !allow_repeats {
                    design.used_globally = true;
                }
            }
        });
    }

    /// End the current client turn: clear per-session flags only, keeping
    /// global usage.
    pub fn reset_pool(&self) {
        tracing::info!("Resetting session pool");
        self.store.mutate(|doc| {
            for design in &mut doc.designs {
                design.used_in_session = false;
            }
        });
    }

    /// Full reset: clear both session and global flags on every design.
    pub fn reset_all_globally_used(&self) {
        tracing::info!("Resetting globally used designs");
        self.store.mutate(|doc| {
            for design in &mut doc.designs {
                design.used_in_session = false;
                design.used_globally = false;
            }
        });
    }
}

fn available_in(doc: &Document) -> Vec<Design> {
    let settings = &doc.settings;
    doc.designs
        .iter()
        .filter(|d| settings.default_roll_folder_id.matches(d))
        .filter(|d| d.is_available(settings.allow_repeats))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SettingsService;
    use crate::storage::MemoryBackend;
    use crate::store::SettingsPatch;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn create_test_store() -> DocumentStore {
        DocumentStore::new(Arc::new(MemoryBackend::new()))
    }

    fn first_design_id(service: &DesignService) -> i64 {
        service.list_all(RollFilter::All)[0].design.id
    }

    fn set_allow_repeats(store: &DocumentStore, allow: bool) {
        SettingsService::new(store.clone()).update(SettingsPatch {
            allow_repeats: Some(allow),
            ..SettingsPatch::default()
        });
    }

    #[test]
    fn test_fresh_store_lists_seeded_designs() {
        let service = DesignService::new(create_test_store());

        let designs = service.list_all(RollFilter::All);

        assert_eq!(designs.len(), 6);
        assert!(designs.iter().all(|d| d.is_available == 1));
    }

    #[test]
    fn test_list_all_scope_semantics() {
        let service = DesignService::new(create_test_store());

        // Star is the only seeded design with no membership.
        let unsorted = service.list_all(RollFilter::Unsorted);
        assert_eq!(unsorted.len(), 1);
        assert_eq!(unsorted[0].design.name, "Star");

        // Spooky (id 3) holds Skull and Dagger.
        let spooky = service.list_all(RollFilter::Folder(3));
        assert_eq!(spooky.len(), 2);
    }

    #[test]
    fn test_add_design_with_and_without_folder() {
        let service = DesignService::new(create_test_store());

        service.add(NewDesign {
            name: "  Swallow ".to_string(),
            image_uri: Some("file:///swallow.png".to_string()),
            folder_id: Some(5),
        });
        service.add(NewDesign {
            name: String::new(),
            image_uri: None,
            folder_id: None,
        });

        let designs = service.list_all(RollFilter::All);
        let swallow = designs.iter().find(|d| d.design.name == "Swallow").unwrap();
        assert_eq!(swallow.design.folder_ids, vec![5]);
        assert_eq!(swallow.design.folder_id, Some(5));

        let untitled = designs.iter().find(|d| d.design.name == "Untitled").unwrap();
        assert!(untitled.design.folder_ids.is_empty());
        assert_eq!(untitled.is_available, 1);
    }

    #[test]
    fn test_delete_design() {
        let service = DesignService::new(create_test_store());
        let id = first_design_id(&service);

        service.delete(id);

        assert!(service
            .list_all(RollFilter::All)
            .iter()
            .all(|d| d.design.id != id));
    }

    #[test]
    fn test_retired_design_is_unavailable_even_with_repeats() {
        let store = create_test_store();
        let service = DesignService::new(store.clone());
        let id = first_design_id(&service);

        set_allow_repeats(&store, true);
        service.set_availability(id, Availability::Retired);

        let listed = service
            .list_all(RollFilter::All)
            .into_iter()
            .find(|d| d.design.id == id)
            .unwrap();
        assert_eq!(listed.is_available, 0);

        service.set_availability(id, Availability::Available);
        let listed = service
            .list_all(RollFilter::All)
            .into_iter()
            .find(|d| d.design.id == id)
            .unwrap();
        assert_eq!(listed.is_available, 1);
    }

    #[test]
    fn test_toggle_folder_twice_is_identity() {
        let service = DesignService::new(create_test_store());
        let before = service.list_all(RollFilter::All)[0].design.clone();

        service.toggle_folder(before.id, 2);
        service.toggle_folder(before.id, 2);

        let after = service
            .list_all(RollFilter::All)
            .into_iter()
            .find(|d| d.design.id == before.id)
            .unwrap();
        assert_eq!(after.design.folder_ids, before.folder_ids);
        assert_eq!(after.design.folder_id, before.folder_id);
    }

    #[test]
    fn test_set_folder_none_clears_membership() {
        let service = DesignService::new(create_test_store());
        let heart = service
            .list_all(RollFilter::All)
            .into_iter()
            .find(|d| d.design.name == "Heart")
            .unwrap()
            .design;
        assert_eq!(heart.folder_ids.len(), 2);

        service.set_folder(heart.id, None);

        let heart = service
            .list_all(RollFilter::Unsorted)
            .into_iter()
            .find(|d| d.design.id == heart.id)
            .unwrap()
            .design;
        assert!(heart.folder_ids.is_empty());
        assert_eq!(heart.folder_id, None);
    }

    #[test]
    fn test_set_folder_prepends_new_primary() {
        let service = DesignService::new(create_test_store());
        let rose = service
            .list_all(RollFilter::All)
            .into_iter()
            .find(|d| d.design.name == "Rose")
            .unwrap()
            .design;

        service.set_folder(rose.id, Some(4));

        let rose = service
            .list_all(RollFilter::Folder(4))
            .into_iter()
            .find(|d| d.design.id == rose.id)
            .unwrap()
            .design;
        assert_eq!(rose.folder_ids, vec![4, 2]);
        assert_eq!(rose.folder_id, Some(4));
    }

    #[test]
    fn test_choose_without_repeats_retires_until_global_reset() {
        let store = create_test_store();
        let service = DesignService::new(store.clone());
        let id = first_design_id(&service);

        service.choose(id);

        assert!(service.list_available().iter().all(|d| d.id != id));

        // A session reset is not enough.
        service.reset_pool();
        assert!(service.list_available().iter().all(|d| d.id != id));

        service.reset_all_globally_used();
        assert!(service.list_available().iter().any(|d| d.id == id));
    }

    #[test]
    fn test_choose_with_repeats_only_blocks_session() {
        let store = create_test_store();
        let service = DesignService::new(store.clone());
        let id = first_design_id(&service);

        set_allow_repeats(&store, true);
        service.choose(id);

        assert!(service.list_available().iter().all(|d| d.id != id));

        service.reset_pool();
        assert!(service.list_available().iter().any(|d| d.id == id));
    }

    #[test]
    fn test_disabling_repeats_is_not_retroactive() {
        let store = create_test_store();
        let service = DesignService::new(store.clone());
        let id = first_design_id(&service);

        // Chosen while repeats were on: used_globally stays false.
        set_allow_repeats(&store, true);
        service.choose(id);

        set_allow_repeats(&store, false);
        service.reset_pool();

        assert!(service.list_available().iter().any(|d| d.id == id));
    }

    #[test]
    fn test_choose_appends_history_in_same_write() {
        let store = create_test_store();
        let service = DesignService::new(store.clone());
        let picked = service.list_all(RollFilter::All)[0].design.clone();

        service.choose(picked.id);

        let doc = store.read();
        assert_eq!(doc.history.len(), 1);
        assert_eq!(doc.history[0].design_id, picked.id);
        assert_eq!(doc.history[0].name, picked.name);
        assert_eq!(doc.history[0].image_uri, picked.image_uri);
        assert!(doc.designs.iter().any(|d| d.id == picked.id && d.used_in_session));
    }

    #[test]
    fn test_choose_unknown_id_writes_no_history() {
        let store = create_test_store();
        let service = DesignService::new(store.clone());

        service.choose(999_999);

        assert!(store.read().history.is_empty());
    }

    #[test]
    fn test_roll_respects_default_scope() {
        let store = create_test_store();
        let service = DesignService::new(store.clone());

        SettingsService::new(store.clone()).update(SettingsPatch {
            default_roll_folder_id: Some(RollFilter::Unsorted),
            ..SettingsPatch::default()
        });

        // Star is the only unsorted seeded design.
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let rolled = service.roll_with(&mut rng).unwrap();
            assert_eq!(rolled.name, "Star");
        }
    }

    #[test]
    fn test_roll_does_not_mutate_state() {
        let store = create_test_store();
        let service = DesignService::new(store.clone());

        let before = store.read();
        let mut rng = StdRng::seed_from_u64(1);
        service.roll_with(&mut rng);

        assert_eq!(store.read(), before);
    }

    #[test]
    fn test_roll_on_empty_pool_returns_none() {
        let store = create_test_store();
        let service = DesignService::new(store.clone());

        for d in service.list_all(RollFilter::All) {
            service.set_availability(d.design.id, Availability::Retired);
        }

        assert!(service.roll().is_none());
    }
}
