//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random ids, items and slot arrays.

use echest_codec::{Item, Slot};
use echest_storage::EntityId;
use proptest::prelude::*;

/// Strategy for generating entity IDs.
pub fn entity_id_strategy() -> impl Strategy<Value = EntityId> {
    prop::array::uniform16(any::<u8>()).prop_map(EntityId::from_bytes)
}

/// Strategy for generating namespaced item kinds such as `minecraft:stone`.
pub fn item_kind_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,12}(:[a-z_]{1,16})?").expect("Invalid regex")
}

/// Strategy for generating items with up to three tags.
pub fn item_strategy() -> impl Strategy<Value = Item> {
    (
        item_kind_strategy(),
        1u32..=64,
        prop::collection::btree_map("[a-z]{1,8}", "[ -~]{0,16}", 0..3),
    )
        .prop_map(|(kind, amount, tags)| Item { kind, amount, tags })
}

/// Strategy for a single slot, empty about a third of the time.
pub fn slot_strategy() -> impl Strategy<Value = Slot> {
    prop_oneof![
        1 => Just(None),
        2 => item_strategy().prop_map(Some),
    ]
}

/// Strategy for slot arrays up to `max_len` long.
pub fn slots_strategy(max_len: usize) -> impl Strategy<Value = Vec<Slot>> {
    prop::collection::vec(slot_strategy(), 0..=max_len)
}

/// Strategy for raw size requests, including out-of-range values.
pub fn size_request_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![
        4 => -20i64..80,
        1 => any::<i64>(),
    ]
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Configuration for tests that touch disk on every case.
    #[must_use]
    pub fn io_bound() -> Self {
        Self {
            cases: 24,
            max_shrink_iters: 64,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::io_bound().to_proptest_config())]

        #[test]
        fn items_have_positive_amounts(item in item_strategy()) {
            prop_assert!(item.amount >= 1 && item.amount <= 64);
            prop_assert!(!item.kind.is_empty());
        }

        #[test]
        fn slot_arrays_respect_max_len(slots in slots_strategy(54)) {
            prop_assert!(slots.len() <= 54);
        }

        #[test]
        fn ids_display_as_uuids(id in entity_id_strategy()) {
            let text = id.to_string();
            prop_assert_eq!(text.len(), 36);
            prop_assert_eq!(text.parse::<EntityId>().unwrap(), id);
        }
    }
}
