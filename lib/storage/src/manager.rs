use crate::catalog::load_catalog;
use crate::snapshot::{SnapshotDescription, SnapshotStore};
use anyhow::{Context, Result};
use parking_lot::RwLock;
use specmatch_core::{CandidateIndex, CatalogItem, IndexConfig};
use std::path::Path;
use std::sync::Arc;

/// Owns the live candidate index.
///
/// Readers take an `Arc` to the current index and search it without holding
/// the lock. Rebuilds and loads construct a fresh index first, then swap it
/// in, so a search never observes a half-built index.
pub struct IndexManager {
    config: IndexConfig,
    current: RwLock<Arc<CandidateIndex>>,
}

impl IndexManager {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(CandidateIndex::new(config))),
        }
    }

    #[inline]
    pub fn config(&self) -> IndexConfig {
        self.config
    }

    /// The index as of now
    #[inline]
    #[must_use]
    pub fn current(&self) -> Arc<CandidateIndex> {
        self.current.read().clone()
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.current.read().is_built()
    }

    /// Build a new index from `items` and publish it
    pub fn rebuild(&self, items: Vec<CatalogItem>) -> Result<()> {
        let index = CandidateIndex::from_items(self.config, items).context("index build failed")?;
        let count = index.count();
        *self.current.write() = Arc::new(index);
        tracing::info!(items = count, "index rebuilt");
        Ok(())
    }

    /// Publish the snapshot in `store`. `Ok(false)` when there is none.
    pub fn load(&self, store: &SnapshotStore) -> Result<bool> {
        match store.load()? {
            Some(index) => {
                *self.current.write() = Arc::new(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn save(&self, store: &SnapshotStore) -> Result<SnapshotDescription> {
        let index = self.current();
        store.save(&index)
    }

    /// Load the snapshot, or on cold start build from the catalog file and
    /// save a fresh snapshot
    pub fn open_or_build<P: AsRef<Path>>(
        &self,
        store: &SnapshotStore,
        catalog: Option<P>,
    ) -> Result<()> {
        if self.load(store)? {
            return Ok(());
        }

        let Some(catalog) = catalog else {
            anyhow::bail!(
                "no snapshot at {} and no catalog to build from",
                store.path().display()
            );
        };

        tracing::info!(path = %store.path().display(), "cold start, building index from catalog");
        self.rebuild(load_catalog(catalog)?)?;
        self.save(store)?;
        Ok(())
    }

    /// Search the current index, returning owned items
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<CatalogItem>> {
        let index = self.current();
        let items = index.search(query, k)?;
        Ok(items.into_iter().cloned().collect())
    }

    pub fn get_by_id(&self, id: &str) -> Option<CatalogItem> {
        self.current().get_by_id(id).cloned()
    }
}

impl Default for IndexManager {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::save_catalog;
    use specmatch_core::AttributeRecord;
    use std::thread;
    use tempfile::tempdir;

    fn items(prefix: &str) -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(
                format!("{}-1", prefix),
                "Aluminium",
                "11kv aluminium xlpe",
                AttributeRecord::builder().conductor_material("al").build(),
            ),
            CatalogItem::new(
                format!("{}-2", prefix),
                "Copper",
                "1.1kv copper pvc",
                AttributeRecord::builder().conductor_material("cu").build(),
            ),
            CatalogItem::new(
                format!("{}-3", prefix),
                "Armoured",
                "6.6kv steel armoured lszh",
                AttributeRecord::builder().armouring("swa").build(),
            ),
        ]
    }

    #[test]
    fn test_starts_unbuilt() {
        let manager = IndexManager::default();
        assert!(!manager.is_ready());
        assert!(manager.search("copper", 1).is_err());
        assert!(manager.get_by_id("A-1").is_none());
    }

    #[test]
    fn test_rebuild_swaps_index() {
        let manager = IndexManager::default();
        manager.rebuild(items("A")).unwrap();
        let before = manager.current();

        manager.rebuild(items("B")).unwrap();

        // Readers holding the old index keep a consistent view
        assert!(before.get_by_id("A-1").is_some());
        assert!(manager.get_by_id("A-1").is_none());
        assert!(manager.get_by_id("B-2").is_some());
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_index() {
        let manager = IndexManager::default();
        manager.rebuild(items("A")).unwrap();
        assert!(manager.rebuild(Vec::new()).is_err());
        assert!(manager.get_by_id("A-1").is_some());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("index.snapshot"));

        let manager = IndexManager::default();
        assert!(!manager.load(&store).unwrap());

        manager.rebuild(items("A")).unwrap();
        manager.save(&store).unwrap();

        let fresh = IndexManager::default();
        assert!(fresh.load(&store).unwrap());
        let ids: Vec<_> = fresh.search("copper", 1).unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["A-2"]);
        assert_eq!(fresh.current().items(), manager.current().items());
    }

    #[test]
    fn test_open_or_build_cold_start() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("index.snapshot"));
        let catalog = dir.path().join("catalog.json");
        save_catalog(&catalog, &items("C")).unwrap();

        let manager = IndexManager::default();
        manager.open_or_build(&store, Some(&catalog)).unwrap();
        assert!(manager.is_ready());
        assert!(store.exists());

        // Second start uses the snapshot even without a catalog
        let restarted = IndexManager::default();
        restarted.open_or_build::<&Path>(&store, None).unwrap();
        assert_eq!(restarted.current().count(), 3);
    }

    #[test]
    fn test_open_or_build_without_catalog_fails() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("index.snapshot"));
        let manager = IndexManager::default();
        assert!(manager.open_or_build::<&Path>(&store, None).is_err());
    }

    #[test]
    fn test_concurrent_readers_during_rebuild() {
        let manager = Arc::new(IndexManager::default());
        manager.rebuild(items("A")).unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let manager = Arc::clone(&manager);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let found = manager.search("copper", 2).unwrap();
                        assert_eq!(found.len(), 2);
                    }
                })
            })
            .collect();

        for prefix in ["B", "C", "D"] {
            manager.rebuild(items(prefix)).unwrap();
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert!(manager.get_by_id("D-1").is_some());
    }
}
