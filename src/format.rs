// SPDX-License-Identifier: MIT
//! KTLV wire format definitions
//!
//! Defines the frame header layout, the closed set of type tags and the
//! integer domain each tag accepts.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Frame header size in bytes: key (2) + type tag (1) + payload length (2)
pub const HEADER_SIZE: usize = 5;

/// Largest payload the 16-bit length field can describe
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Integer domain limits, one pair per integer tag
pub mod limits {
    pub const MIN_UINT8: u8 = 0;
    pub const MAX_UINT8: u8 = 0xFF;
    pub const MIN_UINT16: u16 = 0;
    pub const MAX_UINT16: u16 = 0xFFFF;
    pub const MIN_UINT24: u32 = 0;
    pub const MAX_UINT24: u32 = 0xFF_FFFF;
    pub const MIN_UINT32: u32 = 0;
    pub const MAX_UINT32: u32 = 0xFFFF_FFFF;
    pub const MIN_UINT64: u64 = 0;
    pub const MAX_UINT64: u64 = 0xFFFF_FFFF_FFFF_FFFF;

    pub const MIN_INT8: i8 = -0x80;
    pub const MAX_INT8: i8 = 0x7F;
    pub const MIN_INT16: i16 = -0x8000;
    pub const MAX_INT16: i16 = 0x7FFF;
    pub const MIN_INT24: i32 = -0x80_0000;
    pub const MAX_INT24: i32 = 0x7F_FFFF;
    pub const MIN_INT32: i32 = -0x8000_0000;
    pub const MAX_INT32: i32 = 0x7FFF_FFFF;
    pub const MIN_INT64: i64 = -0x8000_0000_0000_0000;
    pub const MAX_INT64: i64 = 0x7FFF_FFFF_FFFF_FFFF;
}

/// Type tag identifying an element's wire representation
///
/// Discriminants are the on-wire byte values and must never change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Tag {
    Bool = 0,
    Uint8 = 1,
    Uint16 = 2,
    Uint24 = 3,
    Uint32 = 4,
    Uint64 = 5,
    Double = 6,
    String = 7,
    Bitmap = 8,
    Int8 = 9,
    Int16 = 10,
    Int24 = 11,
    Int32 = 12,
    Int64 = 13,

    ListOfString = 50,
    ListOfUint8 = 51,
    ListOfUint16 = 52,
    ListOfUint24 = 53,
    ListOfUint32 = 54,
    ListOfUint64 = 55,
    ListOfDouble = 56,
    ListOfInt8 = 57,
    ListOfInt16 = 58,
    ListOfInt24 = 59,
    ListOfInt32 = 60,
    ListOfInt64 = 61,
}

impl Tag {
    /// Map a wire byte to a tag. Unknown bytes yield `None`.
    #[inline]
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Tag::Bool),
            1 => Some(Tag::Uint8),
            2 => Some(Tag::Uint16),
            3 => Some(Tag::Uint24),
            4 => Some(Tag::Uint32),
            5 => Some(Tag::Uint64),
            6 => Some(Tag::Double),
            7 => Some(Tag::String),
            8 => Some(Tag::Bitmap),
            9 => Some(Tag::Int8),
            10 => Some(Tag::Int16),
            11 => Some(Tag::Int24),
            12 => Some(Tag::Int32),
            13 => Some(Tag::Int64),
            50 => Some(Tag::ListOfString),
            51 => Some(Tag::ListOfUint8),
            52 => Some(Tag::ListOfUint16),
            53 => Some(Tag::ListOfUint24),
            54 => Some(Tag::ListOfUint32),
            55 => Some(Tag::ListOfUint64),
            56 => Some(Tag::ListOfDouble),
            57 => Some(Tag::ListOfInt8),
            58 => Some(Tag::ListOfInt16),
            59 => Some(Tag::ListOfInt24),
            60 => Some(Tag::ListOfInt32),
            61 => Some(Tag::ListOfInt64),
            _ => None,
        }
    }

    /// Wire byte for this tag
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get all tags in wire order
    pub fn all() -> &'static [Tag] {
        &[
            Tag::Bool,
            Tag::Uint8,
            Tag::Uint16,
            Tag::Uint24,
            Tag::Uint32,
            Tag::Uint64,
            Tag::Double,
            Tag::String,
            Tag::Bitmap,
            Tag::Int8,
            Tag::Int16,
            Tag::Int24,
            Tag::Int32,
            Tag::Int64,
            Tag::ListOfString,
            Tag::ListOfUint8,
            Tag::ListOfUint16,
            Tag::ListOfUint24,
            Tag::ListOfUint32,
            Tag::ListOfUint64,
            Tag::ListOfDouble,
            Tag::ListOfInt8,
            Tag::ListOfInt16,
            Tag::ListOfInt24,
            Tag::ListOfInt32,
            Tag::ListOfInt64,
        ]
    }

    /// Get the name of the tag
    pub fn name(self) -> &'static str {
        match self {
            Tag::Bool => "bool",
            Tag::Uint8 => "uint8",
            Tag::Uint16 => "uint16",
            Tag::Uint24 => "uint24",
            Tag::Uint32 => "uint32",
            Tag::Uint64 => "uint64",
            Tag::Double => "double",
            Tag::String => "string",
            Tag::Bitmap => "bitmap",
            Tag::Int8 => "int8",
            Tag::Int16 => "int16",
            Tag::Int24 => "int24",
            Tag::Int32 => "int32",
            Tag::Int64 => "int64",
            Tag::ListOfString => "list_of_string",
            Tag::ListOfUint8 => "list_of_uint8",
            Tag::ListOfUint16 => "list_of_uint16",
            Tag::ListOfUint24 => "list_of_uint24",
            Tag::ListOfUint32 => "list_of_uint32",
            Tag::ListOfUint64 => "list_of_uint64",
            Tag::ListOfDouble => "list_of_double",
            Tag::ListOfInt8 => "list_of_int8",
            Tag::ListOfInt16 => "list_of_int16",
            Tag::ListOfInt24 => "list_of_int24",
            Tag::ListOfInt32 => "list_of_int32",
            Tag::ListOfInt64 => "list_of_int64",
        }
    }

    /// Encoded width of a single value, for fixed-width scalar tags
    ///
    /// `String`, `Bitmap` and every list tag are variable width.
    #[inline]
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Tag::Bool | Tag::Uint8 | Tag::Int8 => Some(1),
            Tag::Uint16 | Tag::Int16 => Some(2),
            Tag::Uint24 | Tag::Int24 => Some(3),
            Tag::Uint32 | Tag::Int32 => Some(4),
            Tag::Uint64 | Tag::Int64 | Tag::Double => Some(8),
            _ => None,
        }
    }

    /// Scalar element tag of a list tag
    pub fn element(self) -> Option<Tag> {
        match self {
            Tag::ListOfString => Some(Tag::String),
            Tag::ListOfUint8 => Some(Tag::Uint8),
            Tag::ListOfUint16 => Some(Tag::Uint16),
            Tag::ListOfUint24 => Some(Tag::Uint24),
            Tag::ListOfUint32 => Some(Tag::Uint32),
            Tag::ListOfUint64 => Some(Tag::Uint64),
            Tag::ListOfDouble => Some(Tag::Double),
            Tag::ListOfInt8 => Some(Tag::Int8),
            Tag::ListOfInt16 => Some(Tag::Int16),
            Tag::ListOfInt24 => Some(Tag::Int24),
            Tag::ListOfInt32 => Some(Tag::Int32),
            Tag::ListOfInt64 => Some(Tag::Int64),
            _ => None,
        }
    }

    /// List tag holding elements of this scalar tag
    pub fn list_of(self) -> Option<Tag> {
        Tag::all()
            .iter()
            .copied()
            .find(|list| list.element() == Some(self))
    }

    #[inline]
    pub fn is_list(self) -> bool {
        self.element().is_some()
    }

    /// Inclusive integer domain of an integer scalar tag
    pub fn int_range(self) -> Option<RangeInclusive<i128>> {
        use limits::*;

        let range = match self {
            Tag::Uint8 => MIN_UINT8 as i128..=MAX_UINT8 as i128,
            Tag::Uint16 => MIN_UINT16 as i128..=MAX_UINT16 as i128,
            Tag::Uint24 => MIN_UINT24 as i128..=MAX_UINT24 as i128,
            Tag::Uint32 => MIN_UINT32 as i128..=MAX_UINT32 as i128,
            Tag::Uint64 => MIN_UINT64 as i128..=MAX_UINT64 as i128,
            Tag::Int8 => MIN_INT8 as i128..=MAX_INT8 as i128,
            Tag::Int16 => MIN_INT16 as i128..=MAX_INT16 as i128,
            Tag::Int24 => MIN_INT24 as i128..=MAX_INT24 as i128,
            Tag::Int32 => MIN_INT32 as i128..=MAX_INT32 as i128,
            Tag::Int64 => MIN_INT64 as i128..=MAX_INT64 as i128,
            _ => return None,
        };
        Some(range)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Tag::all()
            .iter()
            .copied()
            .find(|tag| tag.name() == lower)
            .ok_or_else(|| format!("Invalid type tag: {}", s))
    }
}

impl TryFrom<u8> for Tag {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Tag::from_u8(v).ok_or(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wire_values_are_stable() {
        assert_eq!(Tag::Bool.as_u8(), 0);
        assert_eq!(Tag::Uint24.as_u8(), 3);
        assert_eq!(Tag::Double.as_u8(), 6);
        assert_eq!(Tag::Bitmap.as_u8(), 8);
        assert_eq!(Tag::Int64.as_u8(), 13);
        assert_eq!(Tag::ListOfString.as_u8(), 50);
        assert_eq!(Tag::ListOfDouble.as_u8(), 56);
        assert_eq!(Tag::ListOfInt64.as_u8(), 61);
    }

    #[test]
    fn test_from_u8_round_trip() {
        for &tag in Tag::all() {
            assert_eq!(Tag::from_u8(tag.as_u8()), Some(tag));
        }
        assert_eq!(Tag::all().len(), 26);
    }

    #[test]
    fn test_from_u8_unknown() {
        assert_eq!(Tag::from_u8(14), None);
        assert_eq!(Tag::from_u8(49), None);
        assert_eq!(Tag::from_u8(62), None);
        assert_eq!(Tag::try_from(255u8), Err(255));
    }

    #[test]
    fn test_fixed_width() {
        assert_eq!(Tag::Bool.fixed_width(), Some(1));
        assert_eq!(Tag::Int24.fixed_width(), Some(3));
        assert_eq!(Tag::Double.fixed_width(), Some(8));
        assert_eq!(Tag::String.fixed_width(), None);
        assert_eq!(Tag::Bitmap.fixed_width(), None);
        assert_eq!(Tag::ListOfUint8.fixed_width(), None);
    }

    #[test]
    fn test_element_and_list_of() {
        assert_eq!(Tag::ListOfUint24.element(), Some(Tag::Uint24));
        assert_eq!(Tag::Uint24.list_of(), Some(Tag::ListOfUint24));
        assert_eq!(Tag::String.list_of(), Some(Tag::ListOfString));
        assert_eq!(Tag::Bool.list_of(), None);
        assert_eq!(Tag::Bitmap.list_of(), None);
        assert!(Tag::ListOfDouble.is_list());
        assert!(!Tag::Double.is_list());
    }

    #[test]
    fn test_int_range() {
        assert_eq!(Tag::Uint24.int_range(), Some(0..=0xFF_FFFF));
        assert_eq!(Tag::Int24.int_range(), Some(-0x80_0000..=0x7F_FFFF));
        assert_eq!(Tag::Uint64.int_range(), Some(0..=u64::MAX as i128));
        assert_eq!(Tag::Int64.int_range(), Some(i64::MIN as i128..=i64::MAX as i128));
        assert_eq!(Tag::Double.int_range(), None);
        assert_eq!(Tag::Bool.int_range(), None);
    }

    #[test]
    fn test_name_and_from_str() {
        assert_eq!(Tag::ListOfInt24.to_string(), "list_of_int24");
        for &tag in Tag::all() {
            assert_eq!(Tag::from_str(tag.name()).unwrap(), tag);
        }
        assert_eq!(Tag::from_str("UINT16").unwrap(), Tag::Uint16);
        assert!(Tag::from_str("uint128").is_err());
    }
}
