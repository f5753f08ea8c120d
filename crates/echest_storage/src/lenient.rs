//! Log-and-default access to a [`ChestStorage`].
//!
//! Hosts that cannot act on a storage failure (an inventory close handler,
//! say) still need a value. These helpers log the failure once at `warn`
//! and fall back to what an absent record would return: zero upgrades, the
//! base size, an all-absent slot array. Writes report whether they were
//! confirmed instead of returning the error.

use crate::backend::{size_for_upgrades, ChestStorage};
use crate::error::StorageError;
use crate::id::EntityId;
use echest_codec::Slot;

fn log_failure(backend: &str, op: &'static str, id: EntityId, error: &StorageError) {
    tracing::warn!(
        entity = %id,
        backend,
        op,
        class = %error.class(),
        %error,
        "storage operation failed, using default"
    );
}

/// Default-on-failure variants of every [`ChestStorage`] operation.
pub trait ChestStorageExt: ChestStorage {
    /// Upgrade count, or 0 on failure.
    fn upgrades_or_default(&self, id: EntityId) -> u32 {
        self.upgrades(id).unwrap_or_else(|e| {
            log_failure(self.kind(), "upgrades", id, &e);
            0
        })
    }

    /// Derived size, or the base size on failure.
    fn size_or_default(&self, id: EntityId) -> u32 {
        self.size(id).unwrap_or_else(|e| {
            log_failure(self.kind(), "size", id, &e);
            size_for_upgrades(0)
        })
    }

    /// Stores the upgrade count. Returns false if the write failed.
    fn set_upgrades_logged(&self, id: EntityId, upgrades: u32) -> bool {
        self.set_upgrades(id, upgrades)
            .map_err(|e| log_failure(self.kind(), "set_upgrades", id, &e))
            .is_ok()
    }

    /// Stores the size. Returns false if the write failed.
    fn set_size_logged(&self, id: EntityId, size: u32) -> bool {
        self.set_size(id, size)
            .map_err(|e| log_failure(self.kind(), "set_size", id, &e))
            .is_ok()
    }

    /// Stores the slot array. Returns false if the write failed.
    fn save_items_logged(&self, id: EntityId, slots: &[Slot]) -> bool {
        self.save_items(id, slots)
            .map_err(|e| log_failure(self.kind(), "save_items", id, &e))
            .is_ok()
    }

    /// Loads `size` slots, or `size` absent slots on failure.
    fn load_items_or_empty(&self, id: EntityId, size: usize) -> Vec<Slot> {
        self.load_items(id, size).unwrap_or_else(|e| {
            log_failure(self.kind(), "load_items", id, &e);
            vec![None; size]
        })
    }
}

impl<S: ChestStorage + ?Sized> ChestStorageExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileBackend;
    use crate::relational::RelationalBackend;
    use echest_codec::Item;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn corrupt_file_degrades_to_defaults() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        let id = EntityId::new();
        fs::write(backend.path_for(id), b"[1, 2").unwrap();

        assert_eq!(backend.upgrades_or_default(id), 0);
        assert_eq!(backend.size_or_default(id), 27);
        assert_eq!(backend.load_items_or_empty(id, 9), vec![None; 9]);

        // writes replace the broken document
        assert!(backend.save_items_logged(id, &[Some(Item::new("diamond", 3))]));
        assert!(backend.set_upgrades_logged(id, 1));
        assert_eq!(backend.size_or_default(id), 36);
        assert_eq!(
            backend.load_items_or_empty(id, 1),
            vec![Some(Item::new("diamond", 3))]
        );
    }

    #[test]
    fn unwritable_dir_reports_unconfirmed_writes() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let backend = FileBackend::new(blocker.join("records"));
        let id = EntityId::new();

        assert!(!backend.save_items_logged(id, &[Some(Item::new("dirt", 1))]));
        assert!(!backend.set_size_logged(id, 36));
        assert_eq!(backend.upgrades_or_default(id), 0);
    }

    #[test]
    fn healthy_backend_passes_through() {
        let backend = RelationalBackend::open_in_memory().unwrap();
        let id = EntityId::new();

        assert!(backend.set_size_logged(id, 45));
        assert_eq!(backend.size_or_default(id), 45);
        assert!(backend.save_items_logged(id, &[None, Some(Item::new("dirt", 2))]));
        assert_eq!(
            backend.load_items_or_empty(id, 2),
            vec![None, Some(Item::new("dirt", 2))]
        );
    }
}
