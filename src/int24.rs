// SPDX-License-Identifier: MIT
//! 24-bit integer codec
//!
//! There is no native 3-byte integer, so UINT24 and INT24 are built from two
//! machine primitives. Both directions use the same grouping:
//!
//! ```text
//! byte 0..2  hi = value div 256   (u16 / i16, big-endian)
//! byte 2     lo = value mod 256   (u8)
//! value      = hi * 256 + lo
//! ```
//!
//! The division is arithmetic (floor) so that negative INT24 values split
//! into a negative `hi` and a non-negative `lo`. For both signednesses the
//! result is byte-identical to a plain 3-byte big-endian integer.

use bytes::{Buf, BufMut};

use crate::format::Tag;
use crate::scalar::check_range;
use crate::writer::EncodeError;

/// Encoded width in bytes
pub const WIDTH: usize = 3;

/// Split a 24-bit value into its high 16 bits and low 8 bits
#[inline]
fn split(value: i32) -> (i32, u8) {
    (value.div_euclid(256), value.rem_euclid(256) as u8)
}

#[inline]
fn join(hi: i32, lo: u8) -> i32 {
    hi * 256 + lo as i32
}

/// Write an unsigned 24-bit value, rejecting anything above `0xFF_FFFF`
#[inline]
pub fn put_u24<B: BufMut>(out: &mut B, value: u32) -> Result<(), EncodeError> {
    check_range(Tag::Uint24, value as i128)?;
    let (hi, lo) = split(value as i32);
    out.put_u16(hi as u16);
    out.put_u8(lo);
    Ok(())
}

/// Write a signed 24-bit value, rejecting anything outside the INT24 range
#[inline]
pub fn put_i24<B: BufMut>(out: &mut B, value: i32) -> Result<(), EncodeError> {
    check_range(Tag::Int24, value as i128)?;
    let (hi, lo) = split(value);
    out.put_i16(hi as i16);
    out.put_u8(lo);
    Ok(())
}

/// Read an unsigned 24-bit value. Caller guarantees 3 readable bytes.
#[inline]
pub fn get_u24<B: Buf>(buf: &mut B) -> u32 {
    let hi = buf.get_u16() as i32;
    let lo = buf.get_u8();
    join(hi, lo) as u32
}

/// Read a signed 24-bit value. Caller guarantees 3 readable bytes.
#[inline]
pub fn get_i24<B: Buf>(buf: &mut B) -> i32 {
    let hi = buf.get_i16() as i32;
    let lo = buf.get_u8();
    join(hi, lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::limits::*;

    fn u24_bytes(value: u32) -> Vec<u8> {
        let mut out = Vec::new();
        put_u24(&mut out, value).unwrap();
        out
    }

    fn i24_bytes(value: i32) -> Vec<u8> {
        let mut out = Vec::new();
        put_i24(&mut out, value).unwrap();
        out
    }

    #[test]
    fn test_u24_extremes() {
        for value in [MIN_UINT24, 1, 0xFF, 0x100, 0xFFFF, 0x1_0000, MAX_UINT24] {
            let bytes = u24_bytes(value);
            assert_eq!(bytes.len(), WIDTH);
            assert_eq!(get_u24(&mut bytes.as_slice()), value);
        }
    }

    #[test]
    fn test_i24_extremes() {
        for value in [MIN_INT24, -0x1_0000, -256, -255, -1, 0, 1, 255, 256, MAX_INT24] {
            let bytes = i24_bytes(value);
            assert_eq!(bytes.len(), WIDTH);
            assert_eq!(get_i24(&mut bytes.as_slice()), value);
        }
    }

    #[test]
    fn test_matches_plain_big_endian() {
        assert_eq!(u24_bytes(0x12_3456), vec![0x12, 0x34, 0x56]);
        assert_eq!(u24_bytes(MAX_UINT24), vec![0xFF, 0xFF, 0xFF]);
        assert_eq!(i24_bytes(-1), vec![0xFF, 0xFF, 0xFF]);
        assert_eq!(i24_bytes(MIN_INT24), vec![0x80, 0x00, 0x00]);
        assert_eq!(i24_bytes(MAX_INT24), vec![0x7F, 0xFF, 0xFF]);
        assert_eq!(i24_bytes(-4), vec![0xFF, 0xFF, 0xFC]);
    }

    #[test]
    fn test_values_above_u16() {
        // 0x01_0203 spans all three bytes
        let bytes = u24_bytes(0x01_0203);
        assert_eq!(bytes, vec![0x01, 0x02, 0x03]);
        assert_eq!(get_u24(&mut bytes.as_slice()), 0x01_0203);
    }

    #[test]
    fn test_out_of_range_is_rejected_not_truncated() {
        let mut out = Vec::new();
        let err = put_u24(&mut out, 0x0100_0005).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::Range {
                tag: Tag::Uint24,
                value: 0x0100_0005
            }
        ));

        let err = put_i24(&mut out, MAX_INT24 + 1).unwrap_err();
        assert!(matches!(err, EncodeError::Range { tag: Tag::Int24, .. }));
        let err = put_i24(&mut out, MIN_INT24 - 1).unwrap_err();
        assert!(matches!(err, EncodeError::Range { tag: Tag::Int24, .. }));

        assert!(out.is_empty());
    }
}
