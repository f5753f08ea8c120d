//! Upgrade command implementation.

use echest_core::{ChestManager, UpgradeOutcome};
use echest_storage::EntityId;

/// Runs the upgrade command.
pub fn run(
    manager: &ChestManager,
    id: &EntityId,
    count: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    match manager.add_upgrade(*id, count) {
        UpgradeOutcome::Changed { from, to } => println!("{id}: {from} -> {to} slots"),
        UpgradeOutcome::Unchanged => println!("{id}: already at maximum size"),
        UpgradeOutcome::WriteFailed { from, to } => {
            return Err(format!("{id}: failed to store size {to} (still {from})").into());
        }
    }
    Ok(())
}
