//! In-memory storage backend for testing.

use crate::backend::ChestStorage;
use crate::error::StorageResult;
use crate::id::EntityId;
use echest_codec::Slot;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
struct Record {
    upgrades: u32,
    slots: Vec<Slot>,
}

/// An in-memory storage backend.
///
/// This backend keeps every record in a map and is suitable for:
/// - Unit tests
/// - Dry runs that must not touch disk
///
/// Records are gone when the backend is dropped.
///
/// # Example
///
/// ```rust
/// use echest_storage::{ChestStorage, EntityId, InMemoryBackend};
///
/// let backend = InMemoryBackend::new();
/// let id = EntityId::new();
/// backend.set_size(id, 36).unwrap();
/// assert_eq!(backend.upgrades(id).unwrap(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    records: RwLock<HashMap<EntityId, Record>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Removes every record.
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl ChestStorage for InMemoryBackend {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn upgrades(&self, id: EntityId) -> StorageResult<u32> {
        Ok(self.records.read().get(&id).map_or(0, |r| r.upgrades))
    }

    fn set_upgrades(&self, id: EntityId, upgrades: u32) -> StorageResult<()> {
        self.records.write().entry(id).or_default().upgrades = upgrades;
        Ok(())
    }

    fn save_items(&self, id: EntityId, slots: &[Slot]) -> StorageResult<()> {
        self.records.write().entry(id).or_default().slots = slots.to_vec();
        Ok(())
    }

    fn load_items(&self, id: EntityId, size: usize) -> StorageResult<Vec<Slot>> {
        let records = self.records.read();
        let stored = records.get(&id).map_or(&[][..], |r| r.slots.as_slice());
        Ok((0..size).map(|i| stored.get(i).cloned().flatten()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echest_codec::Item;

    #[test]
    fn memory_new_is_empty() {
        let backend = InMemoryBackend::new();
        assert!(backend.is_empty());
        assert_eq!(backend.upgrades(EntityId::new()).unwrap(), 0);
    }

    #[test]
    fn memory_reads_do_not_create_records() {
        let backend = InMemoryBackend::new();
        backend.load_items(EntityId::new(), 9).unwrap();
        assert!(backend.is_empty());
    }

    #[test]
    fn memory_resizes_on_load() {
        let backend = InMemoryBackend::new();
        let id = EntityId::new();
        backend
            .save_items(id, &[Some(Item::new("apple", 3)), None, Some(Item::new("bread", 1))])
            .unwrap();

        assert_eq!(backend.load_items(id, 1).unwrap(), vec![Some(Item::new("apple", 3))]);
        let wide = backend.load_items(id, 5).unwrap();
        assert_eq!(wide[2], Some(Item::new("bread", 1)));
        assert!(wide[3..].iter().all(Option::is_none));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn memory_clear() {
        let backend = InMemoryBackend::new();
        backend.set_upgrades(EntityId::new(), 1).unwrap();
        backend.clear();
        assert!(backend.is_empty());
    }
}
