//! Storage contract shared by every backend.

use crate::error::StorageResult;
use crate::id::EntityId;
use echest_codec::Slot;

/// Size of a container with no upgrades.
pub const BASE_SIZE: u32 = 27;

/// Slots added by one upgrade (one row).
pub const SLOTS_PER_UPGRADE: u32 = 9;

/// Container size for a given upgrade count: `27 + upgrades * 9`.
#[inline]
#[must_use]
pub const fn size_for_upgrades(upgrades: u32) -> u32 {
    BASE_SIZE.saturating_add(upgrades.saturating_mul(SLOTS_PER_UPGRADE))
}

/// Upgrade count for a size: `max(0, (size - 27) / 9)`, rounded down.
///
/// Only sizes on the `27 + 9k` lattice round-trip through
/// [`size_for_upgrades`]; anything else is truncated.
#[inline]
#[must_use]
pub const fn upgrades_for_size(size: u32) -> u32 {
    size.saturating_sub(BASE_SIZE) / SLOTS_PER_UPGRADE
}

/// Persistent store of per-entity containers.
///
/// Every call is a full round trip to the underlying store; nothing is
/// cached between calls. A missing record reads as zero upgrades and an
/// all-absent slot array.
///
/// # Invariants
///
/// - `size(id) == 27 + upgrades(id) * 9`
/// - `load_items(id, n).len() == n`
/// - `save_items(id, a)` replaces the whole stored array; stored slots at
///   indices `>= a.len()` do not survive
/// - Implementations must be `Send + Sync`
///
/// Failures are returned, not swallowed. Callers that want the
/// log-and-default behaviour use [`crate::ChestStorageExt`].
pub trait ChestStorage: Send + Sync {
    /// Short backend label used in log output.
    fn kind(&self) -> &'static str;

    /// Returns the stored upgrade count, 0 if no record exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn upgrades(&self, id: EntityId) -> StorageResult<u32>;

    /// Stores the upgrade count, creating the record if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn set_upgrades(&self, id: EntityId, upgrades: u32) -> StorageResult<()>;

    /// Returns the container size derived from the upgrade count.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn size(&self, id: EntityId) -> StorageResult<u32> {
        self.upgrades(id).map(size_for_upgrades)
    }

    /// Stores the upgrade count matching `size`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn set_size(&self, id: EntityId, size: u32) -> StorageResult<()> {
        self.set_upgrades(id, upgrades_for_size(size))
    }

    /// Persists the full slot array.
    ///
    /// # Errors
    ///
    /// Returns an error if the slots cannot be encoded or written.
    fn save_items(&self, id: EntityId, slots: &[Slot]) -> StorageResult<()>;

    /// Loads exactly `size` slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read or decoded.
    fn load_items(&self, id: EntityId, size: usize) -> StorageResult<Vec<Slot>>;
}

impl<S: ChestStorage + ?Sized> ChestStorage for Box<S> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn upgrades(&self, id: EntityId) -> StorageResult<u32> {
        (**self).upgrades(id)
    }

    fn set_upgrades(&self, id: EntityId, upgrades: u32) -> StorageResult<()> {
        (**self).set_upgrades(id, upgrades)
    }

    fn size(&self, id: EntityId) -> StorageResult<u32> {
        (**self).size(id)
    }

    fn set_size(&self, id: EntityId, size: u32) -> StorageResult<()> {
        (**self).set_size(id, size)
    }

    fn save_items(&self, id: EntityId, slots: &[Slot]) -> StorageResult<()> {
        (**self).save_items(id, slots)
    }

    fn load_items(&self, id: EntityId, size: usize) -> StorageResult<Vec<Slot>> {
        (**self).load_items(id, size)
    }
}
