// SPDX-License-Identifier: MIT
//! Tag to codec dispatch
//!
//! Every tag is routed by an exhaustive match, so adding a tag to
//! [`Tag`] does not compile until it has an encoding here.

use bytes::BufMut;

use crate::bitmap;
use crate::format::Tag;
use crate::list;
use crate::reader::DecodeError;
use crate::scalar;
use crate::value::Value;
use crate::writer::EncodeError;

/// Encode the payload for `tag` (no frame header)
pub fn encode_payload<B: BufMut>(out: &mut B, tag: Tag, value: &Value) -> Result<(), EncodeError> {
    match tag {
        Tag::Bool
        | Tag::Uint8
        | Tag::Uint16
        | Tag::Uint24
        | Tag::Uint32
        | Tag::Uint64
        | Tag::Int8
        | Tag::Int16
        | Tag::Int24
        | Tag::Int32
        | Tag::Int64
        | Tag::Double
        | Tag::String => scalar::encode(out, tag, value),

        Tag::Bitmap => match value {
            Value::Bitmap(bits) => {
                bitmap::encode(out, bits);
                Ok(())
            }
            _ => Err(EncodeError::TypeMismatch {
                tag,
                found: value.kind(),
            }),
        },

        Tag::ListOfString
        | Tag::ListOfUint8
        | Tag::ListOfUint16
        | Tag::ListOfUint24
        | Tag::ListOfUint32
        | Tag::ListOfUint64
        | Tag::ListOfDouble
        | Tag::ListOfInt8
        | Tag::ListOfInt16
        | Tag::ListOfInt24
        | Tag::ListOfInt32
        | Tag::ListOfInt64 => list::encode(out, tag, value),
    }
}

/// Decode the payload for `tag`
pub fn decode_payload(tag: Tag, payload: &[u8]) -> Result<Value, DecodeError> {
    match tag {
        Tag::Bool
        | Tag::Uint8
        | Tag::Uint16
        | Tag::Uint24
        | Tag::Uint32
        | Tag::Uint64
        | Tag::Int8
        | Tag::Int16
        | Tag::Int24
        | Tag::Int32
        | Tag::Int64
        | Tag::Double
        | Tag::String => scalar::decode(tag, payload),

        Tag::Bitmap => bitmap::decode(payload).map(Value::Bitmap),

        Tag::ListOfString
        | Tag::ListOfUint8
        | Tag::ListOfUint16
        | Tag::ListOfUint24
        | Tag::ListOfUint32
        | Tag::ListOfUint64
        | Tag::ListOfDouble
        | Tag::ListOfInt8
        | Tag::ListOfInt16
        | Tag::ListOfInt24
        | Tag::ListOfInt32
        | Tag::ListOfInt64 => list::decode(tag, payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(tag: Tag) -> Value {
        match tag {
            Tag::Bool => Value::Bool(true),
            Tag::Double => Value::Double(-0.5),
            Tag::String => Value::from("abc"),
            Tag::Bitmap => Value::bits([1, 0, 1]),
            Tag::ListOfString => Value::strings(["a", "bb"]),
            Tag::ListOfDouble => Value::DoubleList(vec![0.25, 8.0]),
            t if t.is_list() => Value::ints([1u8, 2, 3]),
            _ => Value::Int(7),
        }
    }

    #[test]
    fn test_every_tag_round_trips() {
        for &tag in Tag::all() {
            let value = sample(tag);
            let mut out = Vec::new();
            encode_payload(&mut out, tag, &value).unwrap();
            assert_eq!(decode_payload(tag, &out).unwrap(), value, "{}", tag);
        }
    }

    #[test]
    fn test_bitmap_shape_mismatch() {
        let mut out = Vec::new();
        let err = encode_payload(&mut out, Tag::Bitmap, &Value::Int(1)).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::TypeMismatch {
                tag: Tag::Bitmap,
                found: "integer"
            }
        ));
    }
}
