// SPDX-License-Identifier: MIT
//! Scalar codec: booleans, fixed-width integers, doubles and raw strings
//!
//! | Tag | Width | Layout |
//! |---|---|---|
//! | BOOL | 1 | `0` or `1`; any nonzero byte decodes as true |
//! | UINT8 / INT8 | 1 | raw byte |
//! | UINT16 / INT16 | 2 | big-endian |
//! | UINT24 / INT24 | 3 | see [`crate::int24`] |
//! | UINT32 / INT32 | 4 | big-endian |
//! | UINT64 / INT64 | 8 | big-endian |
//! | DOUBLE | 8 | IEEE-754 binary64, big-endian, bits passed through |
//! | STRING | n | raw bytes, length implied by the frame |

use bytes::{Buf, BufMut};

use crate::format::Tag;
use crate::int24;
use crate::reader::DecodeError;
use crate::value::Value;
use crate::writer::EncodeError;

/// Reject an integer outside the tag's domain
#[inline]
pub(crate) fn check_range(tag: Tag, value: i128) -> Result<(), EncodeError> {
    match tag.int_range() {
        Some(range) if range.contains(&value) => Ok(()),
        Some(_) => Err(EncodeError::Range { tag, value }),
        None => Err(EncodeError::TypeMismatch {
            tag,
            found: "integer",
        }),
    }
}

/// Write one range-checked integer in the tag's width
pub(crate) fn put_int<B: BufMut>(out: &mut B, tag: Tag, value: i128) -> Result<(), EncodeError> {
    check_range(tag, value)?;

    match tag {
        Tag::Uint8 => out.put_u8(value as u8),
        Tag::Uint16 => out.put_u16(value as u16),
        Tag::Uint24 => int24::put_u24(out, value as u32)?,
        Tag::Uint32 => out.put_u32(value as u32),
        Tag::Uint64 => out.put_u64(value as u64),
        Tag::Int8 => out.put_i8(value as i8),
        Tag::Int16 => out.put_i16(value as i16),
        Tag::Int24 => int24::put_i24(out, value as i32)?,
        Tag::Int32 => out.put_i32(value as i32),
        Tag::Int64 => out.put_i64(value as i64),
        _ => {
            return Err(EncodeError::TypeMismatch {
                tag,
                found: "integer",
            })
        }
    }
    Ok(())
}

/// Read one integer of the tag's width, or `None` for a non-integer tag.
/// Caller guarantees the bytes are there.
pub(crate) fn get_int<B: Buf>(buf: &mut B, tag: Tag) -> Option<i128> {
    let value = match tag {
        Tag::Uint8 => buf.get_u8() as i128,
        Tag::Uint16 => buf.get_u16() as i128,
        Tag::Uint24 => int24::get_u24(buf) as i128,
        Tag::Uint32 => buf.get_u32() as i128,
        Tag::Uint64 => buf.get_u64() as i128,
        Tag::Int8 => buf.get_i8() as i128,
        Tag::Int16 => buf.get_i16() as i128,
        Tag::Int24 => int24::get_i24(buf) as i128,
        Tag::Int32 => buf.get_i32() as i128,
        Tag::Int64 => buf.get_i64() as i128,
        _ => return None,
    };
    Some(value)
}

/// Encode a scalar tag's payload
pub(crate) fn encode<B: BufMut>(out: &mut B, tag: Tag, value: &Value) -> Result<(), EncodeError> {
    match (tag, value) {
        (Tag::Bool, Value::Bool(b)) => out.put_u8(*b as u8),
        (Tag::Bool, Value::Int(n)) => out.put_u8((*n != 0) as u8),
        (Tag::Double, Value::Double(x)) => out.put_f64(*x),
        (Tag::String, Value::Bytes(b)) => out.put_slice(b),
        (_, Value::Int(n)) if tag.int_range().is_some() => put_int(out, tag, *n)?,
        _ => {
            return Err(EncodeError::TypeMismatch {
                tag,
                found: value.kind(),
            })
        }
    }
    Ok(())
}

/// Decode a scalar tag's payload
pub(crate) fn decode(tag: Tag, payload: &[u8]) -> Result<Value, DecodeError> {
    if tag == Tag::String {
        return Ok(Value::Bytes(payload.to_vec()));
    }

    let width = tag.fixed_width().ok_or(DecodeError::BadLength {
        tag,
        expected: 0,
        actual: payload.len(),
    })?;
    if payload.len() != width {
        return Err(DecodeError::BadLength {
            tag,
            expected: width,
            actual: payload.len(),
        });
    }

    let mut buf = payload;
    match tag {
        Tag::Bool => Ok(Value::Bool(buf.get_u8() != 0)),
        Tag::Double => Ok(Value::Double(buf.get_f64())),
        _ => get_int(&mut buf, tag)
            .map(Value::Int)
            .ok_or(DecodeError::BadLength {
                tag,
                expected: 0,
                actual: payload.len(),
            }),
    }
}
