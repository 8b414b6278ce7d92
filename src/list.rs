// SPDX-License-Identifier: MIT
//! Homogeneous list codec
//!
//! Fixed-width element lists (integers, doubles) are the scalar encodings of
//! their elements back to back; the element count is the payload length
//! divided by the element width. String lists prefix each entry with its own
//! 16-bit big-endian length.

use bytes::{Buf, BufMut};

use crate::format::Tag;
use crate::reader::DecodeError;
use crate::scalar;
use crate::value::Value;
use crate::writer::EncodeError;

/// Encode a list tag's payload
pub(crate) fn encode<B: BufMut>(out: &mut B, tag: Tag, value: &Value) -> Result<(), EncodeError> {
    let element = tag.element().ok_or(EncodeError::TypeMismatch {
        tag,
        found: value.kind(),
    })?;

    match (element, value) {
        (Tag::String, Value::BytesList(items)) => {
            for item in items {
                let len = u16::try_from(item.len()).map_err(|_| EncodeError::PayloadTooLarge {
                    len: item.len(),
                    max: u16::MAX as usize,
                })?;
                out.put_u16(len);
                out.put_slice(item);
            }
        }
        (Tag::Double, Value::DoubleList(items)) => {
            for &x in items {
                out.put_f64(x);
            }
        }
        (_, Value::IntList(items)) if element.int_range().is_some() => {
            for &n in items {
                scalar::put_int(out, element, n)?;
            }
        }
        _ => {
            return Err(EncodeError::TypeMismatch {
                tag,
                found: value.kind(),
            })
        }
    }
    Ok(())
}

/// Decode a list tag's payload
pub(crate) fn decode(tag: Tag, payload: &[u8]) -> Result<Value, DecodeError> {
    match tag.element() {
        Some(Tag::String) => decode_strings(tag, payload).map(Value::BytesList),
        Some(element) => decode_fixed(tag, element, payload),
        None => Err(DecodeError::MalformedList {
            tag,
            reason: "not a list type".to_string(),
        }),
    }
}

fn decode_fixed(tag: Tag, element: Tag, payload: &[u8]) -> Result<Value, DecodeError> {
    let width = element.fixed_width().ok_or_else(|| DecodeError::MalformedList {
        tag,
        reason: format!("{} has no fixed width", element),
    })?;
    if payload.len() % width != 0 {
        return Err(DecodeError::MalformedList {
            tag,
            reason: format!(
                "payload of {} bytes is not a multiple of {} byte elements",
                payload.len(),
                width
            ),
        });
    }

    let value = if element == Tag::Double {
        Value::DoubleList(
            payload
                .chunks_exact(width)
                .map(|mut chunk| chunk.get_f64())
                .collect(),
        )
    } else {
        let items = payload
            .chunks_exact(width)
            .map(|mut chunk| scalar::get_int(&mut chunk, element))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| DecodeError::MalformedList {
                tag,
                reason: format!("{} is not an integer type", element),
            })?;
        Value::IntList(items)
    };
    Ok(value)
}

fn decode_strings(tag: Tag, payload: &[u8]) -> Result<Vec<Vec<u8>>, DecodeError> {
    let mut items = Vec::new();
    let mut buf = payload;

    while buf.has_remaining() {
        if buf.remaining() < 2 {
            return Err(DecodeError::MalformedList {
                tag,
                reason: format!(
                    "truncated length prefix at byte {}",
                    payload.len() - buf.remaining()
                ),
            });
        }
        let len = buf.get_u16() as usize;
        if buf.remaining() < len {
            return Err(DecodeError::MalformedList {
                tag,
                reason: format!(
                    "entry {} declares {} bytes but {} remain",
                    items.len(),
                    len,
                    buf.remaining()
                ),
            });
        }
        items.push(buf[..len].to_vec());
        buf.advance(len);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::limits::*;

    fn enc(tag: Tag, value: Value) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        encode(&mut out, tag, &value)?;
        Ok(out)
    }

    #[test]
    fn test_string_list() {
        let value = Value::strings(["hello", "world", "!"]);
        let encoded = enc(Tag::ListOfString, value.clone()).unwrap();
        assert_eq!(&encoded[..7], &[0, 5, b'h', b'e', b'l', b'l', b'o']);
        assert_eq!(encoded.len(), 2 + 5 + 2 + 5 + 2 + 1);
        assert_eq!(decode(Tag::ListOfString, &encoded).unwrap(), value);
    }

    #[test]
    fn test_string_list_with_empty_entries() {
        let value = Value::strings(["", "a", ""]);
        let encoded = enc(Tag::ListOfString, value.clone()).unwrap();
        assert_eq!(encoded, vec![0, 0, 0, 1, b'a', 0, 0]);
        assert_eq!(decode(Tag::ListOfString, &encoded).unwrap(), value);
    }

    #[test]
    fn test_empty_lists() {
        for &tag in Tag::all().iter().filter(|t| t.is_list()) {
            assert!(decode(tag, &[]).is_ok(), "{}", tag);
        }
        assert_eq!(decode(Tag::ListOfUint32, &[]).unwrap(), Value::IntList(vec![]));
        assert_eq!(decode(Tag::ListOfString, &[]).unwrap(), Value::BytesList(vec![]));
        assert_eq!(decode(Tag::ListOfDouble, &[]).unwrap(), Value::DoubleList(vec![]));
    }

    #[test]
    fn test_integer_lists_with_extremes() {
        let cases = [
            (Tag::ListOfUint8, Value::ints([MIN_UINT8, MAX_UINT8, MAX_UINT8, MIN_UINT8])),
            (Tag::ListOfUint16, Value::ints([MIN_UINT16, MAX_UINT16])),
            (Tag::ListOfUint24, Value::ints([MIN_UINT24, MAX_UINT24, 0x1_0000])),
            (Tag::ListOfUint32, Value::ints([MIN_UINT32, MAX_UINT32])),
            (Tag::ListOfUint64, Value::ints([MIN_UINT64, MAX_UINT64])),
            (Tag::ListOfInt8, Value::ints([0, MIN_INT8, MAX_INT8])),
            (Tag::ListOfInt16, Value::ints([0, MIN_INT16, MAX_INT16])),
            (Tag::ListOfInt24, Value::ints([0, MIN_INT24, MAX_INT24, -4])),
            (Tag::ListOfInt32, Value::ints([0, MIN_INT32, MAX_INT32])),
            (Tag::ListOfInt64, Value::ints([0, MIN_INT64, MAX_INT64])),
        ];

        for (tag, value) in cases {
            let encoded = enc(tag, value.clone()).unwrap();
            let width = tag.element().unwrap().fixed_width().unwrap();
            assert_eq!(encoded.len(), width * value.as_ints().unwrap().len());
            assert_eq!(decode(tag, &encoded).unwrap(), value, "{}", tag);
        }
    }

    #[test]
    fn test_double_list() {
        let value = Value::DoubleList(vec![1.1, -2.2, 3.3]);
        let encoded = enc(Tag::ListOfDouble, value.clone()).unwrap();
        assert_eq!(encoded.len(), 24);
        assert_eq!(&encoded[..8], &1.1f64.to_be_bytes());
        assert_eq!(decode(Tag::ListOfDouble, &encoded).unwrap(), value);
    }

    #[test]
    fn test_element_out_of_range() {
        let err = enc(Tag::ListOfUint8, Value::ints([1i32, 256])).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::Range {
                tag: Tag::Uint8,
                value: 256
            }
        ));

        let err = enc(Tag::ListOfInt24, Value::ints([MIN_INT24 - 1])).unwrap_err();
        assert!(matches!(err, EncodeError::Range { tag: Tag::Int24, .. }));
    }

    #[test]
    fn test_shape_mismatch() {
        assert!(matches!(
            enc(Tag::ListOfDouble, Value::ints([1u8])),
            Err(EncodeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            enc(Tag::ListOfString, Value::Bytes(b"abc".to_vec())),
            Err(EncodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_uneven_fixed_payload() {
        let err = decode(Tag::ListOfUint16, &[0, 1, 2]).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedList { tag: Tag::ListOfUint16, .. }));
        assert!(decode(Tag::ListOfUint24, &[0, 0, 0, 0]).is_err());
        assert!(decode(Tag::ListOfDouble, &[0; 9]).is_err());
    }

    #[test]
    fn test_truncated_string_entries() {
        // dangling single byte where a length prefix should be
        let err = decode(Tag::ListOfString, &[0, 1, b'a', 0]).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedList { .. }));

        // prefix declares more bytes than remain
        let err = decode(Tag::ListOfString, &[0, 4, b'a', b'b']).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedList { .. }));
    }
}
