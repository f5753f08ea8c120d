//! Slot array blob encoding.
//!
//! A blob is a big-endian `i32` slot count followed by one entry per slot:
//!
//! ```text
//! 0x00                         absent slot
//! 0x01 <u32 len> <len bytes>   present slot, CBOR item payload
//! ```
//!
//! Absent slots are written explicitly so positions survive the round trip.

use crate::error::{CodecError, CodecResult};
use crate::item::{Item, Slot};
use bytes::{Buf, BufMut, BytesMut};

/// Marker for an absent slot.
pub const MARKER_EMPTY: u8 = 0x00;

/// Marker for a present slot followed by a length-prefixed payload.
pub const MARKER_ITEM: u8 = 0x01;

const COUNT_LEN: usize = 4;
const PAYLOAD_LEN: usize = 4;

/// Encode a slot array into a blob.
///
/// # Errors
///
/// Returns an error if an item cannot be serialized or the array is longer
/// than the count prefix can express.
pub fn encode_slots(slots: &[Slot]) -> CodecResult<Vec<u8>> {
    let mut encoder = SlotEncoder::with_capacity(slots.len());
    encoder.encode(slots)?;
    Ok(encoder.into_bytes())
}

/// Decode a blob into exactly `size` slots.
///
/// See [`SlotDecoder::decode`] for how short, long and damaged blobs are
/// handled.
///
/// # Errors
///
/// Returns an error if the count prefix is missing or negative.
pub fn decode_slots(bytes: &[u8], size: usize) -> CodecResult<Vec<Slot>> {
    SlotDecoder::new(bytes).decode(size)
}

/// Streaming encoder for slot blobs.
pub struct SlotEncoder {
    buffer: BytesMut,
}

impl SlotEncoder {
    /// Create an encoder sized for roughly `slots` entries.
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(COUNT_LEN + slots * 16),
        }
    }

    /// Append the count prefix and every entry of `slots`.
    pub fn encode(&mut self, slots: &[Slot]) -> CodecResult<()> {
        let count =
            i32::try_from(slots.len()).map_err(|_| CodecError::TooManySlots { len: slots.len() })?;
        self.buffer.put_i32(count);

        for slot in slots {
            match slot {
                None => self.buffer.put_u8(MARKER_EMPTY),
                Some(item) => self.encode_item(item)?,
            }
        }
        Ok(())
    }

    fn encode_item(&mut self, item: &Item) -> CodecResult<()> {
        let payload = item.to_bytes()?;
        let len = u32::try_from(payload.len())
            .map_err(|_| CodecError::encoding_failed("item payload exceeds u32::MAX bytes"))?;
        self.buffer.put_u8(MARKER_ITEM);
        self.buffer.put_u32(len);
        self.buffer.put_slice(&payload);
        Ok(())
    }

    /// Consume this encoder and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.to_vec()
    }
}

/// Decoder for slot blobs.
pub struct SlotDecoder<'a> {
    data: &'a [u8],
}

enum Entry<'a> {
    Empty,
    Item(&'a [u8]),
    /// Unknown marker or an entry cut short; framing is lost.
    Broken,
}

impl<'a> SlotDecoder<'a> {
    /// Create a new decoder for the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Decode into a slot array of exactly `size` entries.
    ///
    /// - Stored entries fill the front of the result; entries past `size`
    ///   are still read but dropped.
    /// - Fewer stored entries than `size` leave the tail absent.
    /// - An item payload that does not decode becomes an absent slot.
    /// - An unknown marker, a length running past the end of the stream or
    ///   a stream ending inside an entry stops decoding; slots read so far
    ///   are kept.
    ///
    /// # Errors
    ///
    /// Fails only on a missing or negative count prefix.
    pub fn decode(&mut self, size: usize) -> CodecResult<Vec<Slot>> {
        let count = self.read_count()?;
        let mut slots: Vec<Slot> = vec![None; size];

        for index in 0..count {
            match self.read_entry() {
                Entry::Empty => {}
                Entry::Item(payload) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Item::from_bytes(payload).ok();
                    }
                }
                Entry::Broken => break,
            }
        }

        Ok(slots)
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> &[u8] {
        self.data
    }

    fn read_count(&mut self) -> CodecResult<usize> {
        if self.data.remaining() < COUNT_LEN {
            return Err(CodecError::UnexpectedEof);
        }
        let count = self.data.get_i32();
        usize::try_from(count).map_err(|_| CodecError::InvalidCount { count })
    }

    fn read_entry(&mut self) -> Entry<'a> {
        if !self.data.has_remaining() {
            return Entry::Broken;
        }
        match self.data.get_u8() {
            MARKER_EMPTY => Entry::Empty,
            MARKER_ITEM => {
                if self.data.remaining() < PAYLOAD_LEN {
                    return Entry::Broken;
                }
                let len = self.data.get_u32() as usize;
                if self.data.remaining() < len {
                    return Entry::Broken;
                }
                let (payload, rest) = self.data.split_at(len);
                self.data = rest;
                Entry::Item(payload)
            }
            _ => Entry::Broken,
        }
    }
}
