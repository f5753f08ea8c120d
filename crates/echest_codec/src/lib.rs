//! # echest codec
//!
//! Encoding for container contents.
//!
//! This crate provides:
//! - [`Item`], the payload of one occupied slot, with a CBOR encoding
//! - The slot blob format used by relational storage: a count prefix
//!   followed by one entry per slot, absent slots included
//!
//! ## Usage
//!
//! ```
//! use echest_codec::{decode_slots, encode_slots, Item};
//!
//! let slots = vec![Some(Item::new("ender_pearl", 16)), None];
//! let bytes = encode_slots(&slots).unwrap();
//!
//! // Ask for a larger container: the tail is absent.
//! let decoded = decode_slots(&bytes, 4).unwrap();
//! assert_eq!(decoded[0], slots[0]);
//! assert!(decoded[1..].iter().all(Option::is_none));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod item;
mod slots;

pub use error::{CodecError, CodecResult};
pub use item::{Item, Slot};
pub use slots::{
    decode_slots, encode_slots, SlotDecoder, SlotEncoder, MARKER_EMPTY, MARKER_ITEM,
};
