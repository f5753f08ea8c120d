//! Host-facing container operations.

use crate::config::Config;
use crate::error::CoreResult;
use crate::policy::{normalize, rows_to_size, upgraded_size, UpgradeOutcome, MAX_SIZE};
use crate::session::AdminSessions;
use echest_codec::Slot;
use echest_storage::{Backend, ChestStorage, ChestStorageExt, EntityId};

/// A loaded container, ready to be shown to a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChestView {
    /// Whose container this is.
    pub owner: EntityId,
    /// Exactly `size` slots.
    pub slots: Vec<Slot>,
}

impl ChestView {
    /// Number of slots in the view.
    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }
}

/// Sizing, loading and saving of containers on top of a [`ChestStorage`].
///
/// Storage failures never reach the caller here: reads fall back to
/// defaults and writes report `false`. Each failure is logged once.
///
/// Saves made while an admin is viewing someone else's container are
/// redirected to that container; see [`ChestManager::save_on_close`].
#[derive(Debug)]
pub struct ChestManager<S = Backend> {
    storage: S,
    default_size: u32,
    sessions: AdminSessions,
}

impl ChestManager<Backend> {
    /// Builds a manager over the configured backend.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.open_backend(), config.default_size)
    }
}

impl<S: ChestStorage> ChestManager<S> {
    /// Creates a manager. `default_size` is used when a stored size cannot
    /// be read.
    pub fn new(storage: S, default_size: u32) -> Self {
        Self {
            storage,
            default_size,
            sessions: AdminSessions::new(),
        }
    }

    /// Returns the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the admin session table.
    pub fn sessions(&self) -> &AdminSessions {
        &self.sessions
    }

    /// Normalized size of `id`'s container.
    pub fn effective_size(&self, id: EntityId) -> u32 {
        match self.storage.size(id) {
            Ok(size) if size > 0 => normalize(size.into()),
            Ok(_) => normalize(self.default_size.into()),
            Err(error) => {
                tracing::warn!(
                    entity = %id,
                    backend = self.storage.kind(),
                    %error,
                    default = self.default_size,
                    "failed to read container size, using default"
                );
                normalize(self.default_size.into())
            }
        }
    }

    /// Stores a normalized size. Returns false if the write failed.
    pub fn set_size(&self, id: EntityId, requested: i64) -> bool {
        let size = normalize(requested).min(MAX_SIZE);
        self.storage.set_size_logged(id, size)
    }

    /// Stores a size given in rows (`1..=6`).
    ///
    /// # Errors
    ///
    /// Returns an error for a row count outside `1..=6`; nothing is written.
    pub fn set_size_in_rows(&self, id: EntityId, rows: u32) -> CoreResult<bool> {
        let size = rows_to_size(rows)?;
        Ok(self.set_size(id, size.into()))
    }

    /// Grows `id`'s container by `count` rows, up to the maximum size.
    ///
    /// A container already at the maximum is left untouched and reported
    /// as [`UpgradeOutcome::Unchanged`]. A failed write is reported as
    /// [`UpgradeOutcome::WriteFailed`].
    pub fn add_upgrade(&self, id: EntityId, count: u32) -> UpgradeOutcome {
        let current = self.effective_size(id);
        let target = upgraded_size(current, count);
        if target == current {
            return UpgradeOutcome::Unchanged;
        }
        if self.set_size(id, target.into()) {
            UpgradeOutcome::Changed {
                from: current,
                to: target,
            }
        } else {
            UpgradeOutcome::WriteFailed {
                from: current,
                to: target,
            }
        }
    }

    /// Loads `owner`'s container at its effective size.
    pub fn open_chest(&self, owner: EntityId) -> ChestView {
        let size = self.effective_size(owner) as usize;
        ChestView {
            owner,
            slots: self.storage.load_items_or_empty(owner, size),
        }
    }

    /// Saves `owner`'s container. Returns false if the write failed.
    pub fn save_chest(&self, owner: EntityId, slots: &[Slot]) -> bool {
        self.storage.save_items_logged(owner, slots)
    }

    /// Loads `target`'s container for `admin` and remembers the session so
    /// the next save from `admin` goes to `target`.
    pub fn open_for_admin(&self, admin: EntityId, target: EntityId) -> ChestView {
        let view = self.open_chest(target);
        self.sessions.open(admin, target);
        tracing::debug!(%admin, %target, "admin opened container");
        view
    }

    /// Saves the container `admin` is viewing and ends the session.
    ///
    /// Returns the entity written to, or `None` (and writes nothing) if
    /// `admin` has no open session.
    pub fn save_admin_view(&self, admin: EntityId, slots: &[Slot]) -> Option<EntityId> {
        let target = self.sessions.consume(admin)?;
        self.save_chest(target, slots);
        Some(target)
    }

    /// Saves a container that `viewer` just closed.
    ///
    /// If `viewer` has an admin session the slots go to the viewed entity,
    /// otherwise to `viewer`'s own container. Returns the entity written to.
    pub fn save_on_close(&self, viewer: EntityId, slots: &[Slot]) -> EntityId {
        match self.save_admin_view(viewer, slots) {
            Some(target) => target,
            None => {
                self.save_chest(viewer, slots);
                viewer
            }
        }
    }

    /// Entity `admin` is currently viewing.
    pub fn admin_target(&self, admin: EntityId) -> Option<EntityId> {
        self.sessions.current_target(admin)
    }
}
