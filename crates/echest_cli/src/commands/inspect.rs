//! Inspect command implementation.

use echest_codec::Item;
use echest_core::ChestManager;
use echest_storage::{ChestStorage, EntityId};
use serde::Serialize;

/// Container inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Entity id.
    pub id: String,
    /// Backend that served the record.
    pub backend: &'static str,
    /// Stored upgrade count.
    pub upgrades: u32,
    /// Effective container size.
    pub size: u32,
    /// Number of non-empty slots.
    pub occupied: usize,
    /// Non-empty slots in index order.
    pub slots: Vec<SlotEntry>,
}

/// One occupied slot.
#[derive(Debug, Serialize)]
pub struct SlotEntry {
    /// Slot index.
    pub index: usize,
    /// Item in the slot.
    pub item: Item,
}

/// Runs the inspect command.
///
/// Unlike the manager's lenient reads, a failing backend is reported as an
/// error here.
pub fn run(
    manager: &ChestManager,
    id: &EntityId,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let storage = manager.storage();
    let upgrades = storage.upgrades(*id)?;
    let size = manager.effective_size(*id);
    let slots = storage.load_items(*id, size as usize)?;

    let slots: Vec<SlotEntry> = slots
        .into_iter()
        .enumerate()
        .filter_map(|(index, slot)| slot.map(|item| SlotEntry { index, item }))
        .collect();

    let result = InspectResult {
        id: id.to_string(),
        backend: storage.kind(),
        upgrades,
        size,
        occupied: slots.len(),
        slots,
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("Container {}", result.id);
    println!("==========================================");
    println!();
    println!("Backend:  {}", result.backend);
    println!("Upgrades: {}", result.upgrades);
    println!("Size:     {} slots ({} rows)", result.size, result.size / 9);
    println!("Occupied: {}/{}", result.occupied, result.size);

    if !result.slots.is_empty() {
        println!();
        println!("Slots:");
        for entry in &result.slots {
            println!(
                "  [{:>2}] {} x{}{}",
                entry.index,
                entry.item.kind,
                entry.item.amount,
                format_tags(&entry.item)
            );
        }
    }
}

fn format_tags(item: &Item) -> String {
    if item.tags.is_empty() {
        return String::new();
    }
    let tags: Vec<String> = item.tags.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!(" {{{}}}", tags.join(", "))
}
