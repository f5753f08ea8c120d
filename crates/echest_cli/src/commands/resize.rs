//! Resize command implementation.

use echest_core::ChestManager;
use echest_storage::EntityId;

/// Runs the resize command.
pub fn run(
    manager: &ChestManager,
    id: &EntityId,
    rows: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let before = manager.effective_size(*id);
    if !manager.set_size_in_rows(*id, rows)? {
        return Err(format!("failed to store size for {id}").into());
    }
    let after = manager.effective_size(*id);

    println!("{id}: {before} -> {after} slots");
    if after != rows * 9 {
        // upgrades cannot go below zero, so sizes under 27 persist as 27
        println!("note: requested {} slots, stored size is {after}", rows * 9);
    }
    Ok(())
}
