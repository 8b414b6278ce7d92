// SPDX-License-Identifier: MIT
//! # KTLV
//!
//! A compact Key/Type/Length/Value binary encoding for tagged, ordered
//! collections of heterogeneous values exchanged between processes or
//! runtimes.
//!
//! ## Format Overview
//!
//! A record is a flat concatenation of frames. There is no record header,
//! no element count and no trailer: the end of the buffer is the end of the
//! record. Keys need not be unique; decoding to a map keeps the last
//! occurrence of a repeated key.
//!
//! ```text
//! KTLV record
//! ===========
//!
//! Frame (repeated):
//! - Key: element key (2 bytes, big-endian)
//! - Type: type tag (1 byte)
//! - Length: payload length, at most 65535 (2 bytes, big-endian)
//! - Payload: `Length` bytes
//!
//! Type tags (wire-stable):
//!   0 BOOL      1 UINT8     2 UINT16    3 UINT24    4 UINT32
//!   5 UINT64    6 DOUBLE    7 STRING    8 BITMAP    9 INT8
//!  10 INT16    11 INT24    12 INT32    13 INT64
//!  50 LIST_OF_STRING   51-55 LIST_OF_UINT8..UINT64   56 LIST_OF_DOUBLE
//!  57-61 LIST_OF_INT8..INT64
//! ```
//!
//! Integers and doubles are big-endian at their tag's width. Strings are raw
//! bytes. Fixed-width lists are their elements back to back; string lists
//! prefix every entry with a 16-bit length. Bitmaps start with a padding
//! count and pack bits MSB-first with the padding at the front.
//!
//! Decoders skip frames whose type tag they do not recognize, so older
//! readers keep working when new tags appear.
//!
//! ## Usage
//!
//! ```rust
//! use ktlv::{Element, Tag, Value};
//!
//! let elements = vec![
//!     Element::new(1, Tag::Bool, true),
//!     Element::new(8, Tag::String, "hello"),
//!     Element::new(9, Tag::Bitmap, Value::bits([1, 1, 0, 0, 1, 0, 1, 1, 1, 1])),
//! ];
//!
//! let bytes = ktlv::encode(&elements).unwrap();
//! assert_eq!(ktlv::decode(&bytes).unwrap(), elements);
//!
//! let map = ktlv::decode_to_map(&bytes).unwrap();
//! assert_eq!(map.get_str(8).unwrap(), "hello");
//! ```

pub mod bitmap;
pub mod codec;
pub mod config;
pub mod dict;
pub mod format;
pub mod frame;
pub mod int24;
mod list;
pub mod reader;
pub mod registry;
mod scalar;
pub mod value;
pub mod writer;

// Re-export main types
pub use codec::Codec;
pub use config::{CodecConfig, UnknownTagPolicy};
pub use dict::{Dict, LookupError};
pub use format::{Tag, HEADER_SIZE, MAX_PAYLOAD_LEN};
pub use frame::{frame, unframe_all, Frame, Frames};
pub use reader::{DecodeError, Decoder};
pub use value::{Element, Value};
pub use writer::{EncodeError, Encoder};

/// Encode elements in order with the default configuration
pub fn encode<'e, I>(elements: I) -> Result<Vec<u8>, EncodeError>
where
    I: IntoIterator<Item = &'e Element>,
{
    Codec::new().encode(elements)
}

/// Decode a record into its elements, skipping unknown tags
pub fn decode(buffer: &[u8]) -> Result<Vec<Element>, DecodeError> {
    Codec::new().decode(buffer)
}

/// Decode a record into a key-indexed map, skipping unknown tags
pub fn decode_to_map(buffer: &[u8]) -> Result<Dict, DecodeError> {
    Codec::new().decode_to_map(buffer)
}
