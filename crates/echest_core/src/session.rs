//! Admin viewing sessions.

use echest_storage::EntityId;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Tracks which entity's container each admin is currently viewing.
///
/// An admin has at most one target. The session is created when the admin
/// opens someone else's container and consumed when that view is saved.
/// Nothing is persisted; a restart drops every open session.
///
/// # Thread Safety
///
/// All access goes through one mutex, so `open` and `consume` for the same
/// admin never interleave.
#[derive(Debug, Default)]
pub struct AdminSessions {
    targets: Mutex<HashMap<EntityId, EntityId>>,
}

impl AdminSessions {
    /// Creates an empty session table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `admin` is viewing `target`, replacing any previous
    /// target. Returns the replaced target.
    pub fn open(&self, admin: EntityId, target: EntityId) -> Option<EntityId> {
        let previous = self.targets.lock().insert(admin, target);
        if let Some(previous) = previous {
            tracing::debug!(%admin, %previous, %target, "admin session retargeted");
        }
        previous
    }

    /// Returns the entity `admin` is viewing, if any.
    #[must_use]
    pub fn current_target(&self, admin: EntityId) -> Option<EntityId> {
        self.targets.lock().get(&admin).copied()
    }

    /// Removes and returns the entity `admin` is viewing.
    pub fn consume(&self, admin: EntityId) -> Option<EntityId> {
        self.targets.lock().remove(&admin)
    }

    /// Number of open sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.lock().len()
    }

    /// Returns true if no admin is viewing anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn open_then_consume() {
        let sessions = AdminSessions::new();
        let admin = EntityId::new();
        let target = EntityId::new();

        assert_eq!(sessions.open(admin, target), None);
        assert_eq!(sessions.current_target(admin), Some(target));
        assert_eq!(sessions.current_target(admin), Some(target));

        assert_eq!(sessions.consume(admin), Some(target));
        assert_eq!(sessions.current_target(admin), None);
        assert_eq!(sessions.consume(admin), None);
    }

    #[test]
    fn reopen_overwrites() {
        let sessions = AdminSessions::new();
        let admin = EntityId::new();
        let first = EntityId::new();
        let second = EntityId::new();

        sessions.open(admin, first);
        assert_eq!(sessions.open(admin, second), Some(first));
        assert_eq!(sessions.current_target(admin), Some(second));
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn admins_are_independent() {
        let sessions = AdminSessions::new();
        let (a, b) = (EntityId::new(), EntityId::new());
        let (ta, tb) = (EntityId::new(), EntityId::new());

        sessions.open(a, ta);
        sessions.open(b, tb);
        assert_eq!(sessions.consume(a), Some(ta));
        assert_eq!(sessions.current_target(b), Some(tb));
    }

    #[test]
    fn concurrent_consume_hands_out_target_once() {
        let sessions = Arc::new(AdminSessions::new());
        let admin = EntityId::new();
        sessions.open(admin, EntityId::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sessions = Arc::clone(&sessions);
                std::thread::spawn(move || sessions.consume(admin).is_some())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert!(sessions.is_empty());
    }
}
