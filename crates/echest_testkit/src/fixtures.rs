//! Test fixtures and backend helpers.
//!
//! Provides convenience functions for opening each backend over throwaway
//! storage and for seeding common scenarios.

use echest_core::ChestManager;
use echest_storage::{Backend, FileBackend, InMemoryBackend, RelationalBackend};
use std::path::Path;
use tempfile::TempDir;

/// A backend with automatic cleanup.
pub struct TestStore {
    /// The backend instance.
    pub backend: Backend,
    /// Short label for assertion messages.
    pub label: &'static str,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: Option<TempDir>,
}

impl TestStore {
    /// Creates a file backend in a fresh temporary directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let backend = FileBackend::open(temp_dir.path()).expect("Failed to open file backend");
        Self {
            backend: backend.into(),
            label: "file",
            temp_dir: Some(temp_dir),
        }
    }

    /// Creates a relational backend on an in-memory SQLite database.
    pub fn sqlite_memory() -> Self {
        let backend =
            RelationalBackend::open_in_memory().expect("Failed to open in-memory database");
        Self {
            backend: backend.into(),
            label: "sqlite-memory",
            temp_dir: None,
        }
    }

    /// Creates a relational backend on a SQLite file in a temporary directory.
    pub fn sqlite_file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let backend = RelationalBackend::open(&temp_dir.path().join("chests.db"))
            .expect("Failed to open database file");
        Self {
            backend: backend.into(),
            label: "sqlite-file",
            temp_dir: Some(temp_dir),
        }
    }

    /// Creates a process-local backend.
    pub fn memory() -> Self {
        Self {
            backend: InMemoryBackend::new().into(),
            label: "memory",
            temp_dir: None,
        }
    }

    /// One store per backend variant.
    pub fn all() -> Vec<Self> {
        vec![
            Self::file(),
            Self::sqlite_memory(),
            Self::sqlite_file(),
            Self::memory(),
        ]
    }

    /// Returns the temporary directory if the store lives on disk.
    pub fn dir(&self) -> Option<&Path> {
        self.temp_dir.as_ref().map(TempDir::path)
    }

    /// Wraps the store in a manager with the given default size.
    pub fn into_manager(self, default_size: u32) -> TestManager {
        TestManager {
            manager: ChestManager::new(self.backend, default_size),
            label: self.label,
            _temp_dir: self.temp_dir,
        }
    }
}

impl std::ops::Deref for TestStore {
    type Target = Backend;

    fn deref(&self) -> &Self::Target {
        &self.backend
    }
}

/// A manager over a [`TestStore`], keeping its directory alive.
pub struct TestManager {
    /// The manager instance.
    pub manager: ChestManager,
    /// Label of the underlying store.
    pub label: &'static str,
    _temp_dir: Option<TempDir>,
}

impl std::ops::Deref for TestManager {
    type Target = ChestManager;

    fn deref(&self) -> &Self::Target {
        &self.manager
    }
}

/// Runs a test once against every backend variant.
///
/// # Example
///
/// ```rust
/// use echest_testkit::with_each_backend;
/// use echest_storage::{ChestStorage, EntityId};
///
/// with_each_backend(|store| {
///     let id = EntityId::new();
///     store.set_upgrades(id, 2).unwrap();
///     assert_eq!(store.size(id).unwrap(), 45, "{}", store.label);
/// });
/// ```
pub fn with_each_backend<F>(mut f: F)
where
    F: FnMut(&TestStore),
{
    for store in TestStore::all() {
        f(&store);
    }
}

/// Runs a test once against a manager over every backend variant.
pub fn with_each_manager<F>(default_size: u32, mut f: F)
where
    F: FnMut(&TestManager),
{
    for store in TestStore::all() {
        f(&store.into_manager(default_size));
    }
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use echest_codec::{Item, Slot};
    use echest_storage::{ChestStorage, EntityId};

    /// A full-width container where every third slot is empty.
    pub fn sample_slots(len: usize) -> Vec<Slot> {
        (0..len)
            .map(|i| (i % 3 != 2).then(|| Item::new(format!("item_{i}"), (i as u32 % 64) + 1)))
            .collect()
    }

    /// Seeds `entity_count` records with increasing upgrade counts and
    /// sample contents. Returns the ids in insertion order.
    pub fn populate(store: &TestStore, entity_count: usize) -> Vec<EntityId> {
        (0..entity_count)
            .map(|i| {
                let id = EntityId::new();
                let upgrades = (i % 4) as u32;
                store
                    .set_upgrades(id, upgrades)
                    .expect("Failed to set upgrades");
                store
                    .save_items(id, &sample_slots(store.size(id).expect("Failed to read size") as usize))
                    .expect("Failed to save items");
                id
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echest_storage::{ChestStorage, EntityId};

    #[test]
    fn every_variant_is_covered() {
        let labels: Vec<_> = TestStore::all().iter().map(|s| s.label).collect();
        assert_eq!(labels, ["file", "sqlite-memory", "sqlite-file", "memory"]);
    }

    #[test]
    fn on_disk_stores_have_a_dir() {
        assert!(TestStore::file().dir().is_some());
        assert!(TestStore::sqlite_file().dir().is_some());
        assert!(TestStore::memory().dir().is_none());
    }

    #[test]
    fn backend_kinds() {
        assert_eq!(TestStore::file().kind(), "file");
        assert_eq!(TestStore::sqlite_memory().kind(), "relational");
        assert_eq!(TestStore::memory().kind(), "memory");
    }

    #[test]
    fn populated_scenario() {
        with_each_backend(|store| {
            let ids = scenarios::populate(store, 5);
            assert_eq!(ids.len(), 5);
            assert_eq!(store.upgrades(ids[3]).unwrap(), 3, "{}", store.label);
            let slots = store.load_items(ids[1], 36).unwrap();
            assert_eq!(slots, scenarios::sample_slots(36), "{}", store.label);
        });
    }

    #[test]
    fn manager_keeps_file_store_alive() {
        let manager = TestStore::file().into_manager(27);
        let id = EntityId::new();
        assert!(manager.set_size(id, 45));
        assert_eq!(manager.effective_size(id), 45);
    }
}
