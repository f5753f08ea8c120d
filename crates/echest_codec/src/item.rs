//! Container item payload.

use crate::error::{CodecError, CodecResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One slot of a container: either an item or nothing.
pub type Slot = Option<Item>;

/// The contents of a single occupied slot.
///
/// Storage never looks inside an item; it only distinguishes present
/// slots from absent ones. The fields exist so that a host can round-trip
/// its own item representation without loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Host-defined item type (for example a material name).
    pub kind: String,
    /// Stack size.
    pub amount: u32,
    /// Free-form host metadata (display name, model data, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl Item {
    /// Creates an item with no tags.
    pub fn new(kind: impl Into<String>, amount: u32) -> Self {
        Self {
            kind: kind.into(),
            amount,
            tags: BTreeMap::new(),
        }
    }

    /// Adds a tag, replacing any previous value for `key`.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Encodes this item as a CBOR payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        ciborium::into_writer(self, &mut out)
            .map_err(|e| CodecError::encoding_failed(e.to_string()))?;
        Ok(out)
    }

    /// Decodes an item from a CBOR payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a valid item.
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        ciborium::from_reader(bytes).map_err(|e| CodecError::decoding_failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_roundtrip_keeps_tags() {
        let item = Item::new("diamond_sword", 1)
            .with_tag("display", "Excalibur")
            .with_tag("model", "999");
        let bytes = item.to_bytes().unwrap();
        assert_eq!(Item::from_bytes(&bytes).unwrap(), item);
    }

    #[test]
    fn garbage_payload_is_rejected() {
        let result = Item::from_bytes(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(CodecError::DecodingFailed { .. })));
    }

    #[test]
    fn wrong_shape_is_rejected() {
        // a CBOR integer, not a map
        let result = Item::from_bytes(&[0x18, 0x2a]);
        assert!(result.is_err());
    }

    #[test]
    fn with_tag_overwrites() {
        let item = Item::new("stone", 64).with_tag("k", "a").with_tag("k", "b");
        assert_eq!(item.tags.get("k").map(String::as_str), Some("b"));
        assert_eq!(item.tags.len(), 1);
    }
}
