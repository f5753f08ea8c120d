//! Manager behavior on top of every backend.

use echest_codec::Item;
use echest_core::policy::normalize;
use echest_core::{ChestManager, Config, UpgradeOutcome};
use echest_storage::{Backend, ChestStorage, EntityId};
use echest_testkit::prelude::*;
use proptest::prelude::*;

#[test]
fn upgrade_from_base_and_from_max() {
    with_each_manager(27, |manager| {
        let id = EntityId::new();
        assert_eq!(
            manager.add_upgrade(id, 1),
            UpgradeOutcome::Changed { from: 27, to: 36 },
            "{}",
            manager.label
        );
        assert_eq!(manager.storage().size(id).unwrap(), 36, "{}", manager.label);

        let full = EntityId::new();
        manager.set_size(full, 54);
        assert_eq!(manager.add_upgrade(full, 1), UpgradeOutcome::Unchanged, "{}", manager.label);
        assert_eq!(manager.storage().size(full).unwrap(), 54, "{}", manager.label);
    });
}

#[test]
fn upgrades_step_to_the_cap() {
    with_each_manager(27, |manager| {
        let id = EntityId::new();
        let sizes: Vec<u32> = (0..4)
            .map(|_| {
                manager.add_upgrade(id, 1);
                manager.effective_size(id)
            })
            .collect();
        assert_eq!(sizes, [36, 45, 54, 54], "{}", manager.label);
    });
}

#[test]
fn view_size_follows_resize() {
    with_each_manager(27, |manager| {
        let id = EntityId::new();
        for (rows, expected) in [(6, 54), (4, 36), (3, 27), (2, 27)] {
            manager.set_size_in_rows(id, rows).unwrap();
            assert_eq!(manager.open_chest(id).size(), expected, "{} rows={rows}", manager.label);
        }
    });
}

#[test]
fn admin_edits_land_on_target() {
    with_each_manager(27, |manager| {
        let admin = EntityId::new();
        let target = EntityId::new();
        manager.save_chest(target, &[Some(Item::new("book", 1))]);

        let mut view = manager.open_for_admin(admin, target);
        assert_eq!(view.slots[0], Some(Item::new("book", 1)), "{}", manager.label);
        view.slots[0] = None;
        view.slots[9] = Some(Item::new("feather", 5));

        assert_eq!(manager.save_on_close(admin, &view.slots), target, "{}", manager.label);
        assert_eq!(manager.admin_target(admin), None);

        let reloaded = manager.open_chest(target);
        assert_eq!(reloaded.slots[0], None, "{}", manager.label);
        assert_eq!(reloaded.slots[9], Some(Item::new("feather", 5)), "{}", manager.label);
        assert!(
            manager.open_chest(admin).slots.iter().all(Option::is_none),
            "{}",
            manager.label
        );
    });
}

#[test]
fn configured_sqlite_manager() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new()
        .base_type("sqlite")
        .connection_uri(format!("jdbc:sqlite:{}", dir.path().join("data.db").display()))
        .data_dir(dir.path().join("playerdata"));

    let manager = ChestManager::from_config(&config);
    assert!(matches!(manager.storage(), Backend::Relational(_)));

    let id = EntityId::new();
    manager.add_upgrade(id, 2);
    assert_eq!(manager.effective_size(id), 45);
}

#[test]
fn configured_mongodb_uses_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new().base_type("mongodb").data_dir(dir.path());

    let manager = ChestManager::from_config(&config);
    assert!(matches!(manager.storage(), Backend::File(_)));

    let id = EntityId::new();
    manager.save_chest(id, &[Some(Item::new("map", 1))]);
    assert!(dir.path().join(format!("{id}.json")).exists());
}

proptest! {
    #![proptest_config(PropTestConfig::io_bound().to_proptest_config())]

    #[test]
    fn effective_size_is_normalized(requested in size_request_strategy()) {
        let manager = TestStore::memory().into_manager(27);
        let id = EntityId::new();
        manager.set_size(id, requested);

        let size = manager.effective_size(id);
        prop_assert_eq!(normalize(i64::from(size)), size);
        prop_assert!(size >= 27);
        prop_assert_eq!(manager.open_chest(id).size(), size as usize);
    }
}
