// SPDX-License-Identifier: MIT
//! Bitmap codec
//!
//! ```text
//! byte 0     unused: number of zero padding bits (0-7)
//! byte 1..   bits packed MSB-first, padding bits at the front
//! ```
//!
//! `[1,1,0,1,1,0,0,1,1]` (9 bits) needs 7 padding bits and encodes as
//! `07 01 B3`. The empty sequence encodes as the single byte `00`.

use bytes::BufMut;

use crate::reader::DecodeError;

/// Number of padding bits needed to fill the last byte
#[inline]
pub fn unused_bits(bit_count: usize) -> u8 {
    ((8 - bit_count % 8) % 8) as u8
}

/// Encode a bit sequence
pub fn encode<B: BufMut>(out: &mut B, bits: &[bool]) {
    let unused = unused_bits(bits.len());
    let padded_len = bits.len() + unused as usize;

    let mut packed = vec![0u8; padded_len / 8];
    for (i, _) in bits.iter().enumerate().filter(|(_, bit)| **bit) {
        let pos = unused as usize + i;
        packed[pos / 8] |= 0x80 >> (pos % 8);
    }

    out.put_u8(unused);
    out.put_slice(&packed);
}

/// Decode a bit sequence
///
/// An empty payload, or a padding count with no data bytes behind it, is an
/// empty sequence. Padding counts of 8 or more are accepted as long as they
/// fit inside the data bytes.
pub fn decode(payload: &[u8]) -> Result<Vec<bool>, DecodeError> {
    let Some((&unused, data)) = payload.split_first() else {
        return Ok(Vec::new());
    };

    let available = data.len() * 8;
    if data.is_empty() {
        return Ok(Vec::new());
    }
    if unused as usize > available {
        return Err(DecodeError::MalformedBitmap { unused, available });
    }

    let bits = (unused as usize..available)
        .map(|pos| data[pos / 8] & (0x80 >> (pos % 8)) != 0)
        .collect();
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(digits: &[u8]) -> Vec<bool> {
        digits.iter().map(|&d| d != 0).collect()
    }

    fn enc(digits: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        encode(&mut out, &bits(digits));
        out
    }

    #[test]
    fn test_unused_bits() {
        assert_eq!(unused_bits(0), 0);
        assert_eq!(unused_bits(1), 7);
        assert_eq!(unused_bits(7), 1);
        assert_eq!(unused_bits(8), 0);
        assert_eq!(unused_bits(9), 7);
        assert_eq!(unused_bits(16), 0);
    }

    #[test]
    fn test_empty() {
        let encoded = enc(&[]);
        assert_eq!(encoded, vec![0x00]);
        assert_eq!(decode(&encoded).unwrap(), Vec::<bool>::new());
    }

    #[test]
    fn test_single_bits() {
        assert_eq!(enc(&[0]), vec![0x07, 0x00]);
        assert_eq!(enc(&[1]), vec![0x07, 0x01]);
        assert_eq!(decode(&[0x07, 0x00]).unwrap(), bits(&[0]));
        assert_eq!(decode(&[0x07, 0x01]).unwrap(), bits(&[1]));
    }

    #[test]
    fn test_nine_bits() {
        let input = [1, 1, 0, 1, 1, 0, 0, 1, 1];
        let encoded = enc(&input);
        assert_eq!(encoded, vec![0x07, 0x01, 0xB3]);
        assert_eq!(decode(&encoded).unwrap(), bits(&input));
    }

    #[test]
    fn test_full_byte_has_no_padding() {
        let input = [1, 0, 1, 0, 1, 0, 1, 1];
        let encoded = enc(&input);
        assert_eq!(encoded, vec![0x00, 0xAB]);
        assert_eq!(decode(&encoded).unwrap(), bits(&input));
    }

    #[test]
    fn test_ten_bits() {
        let input = [1, 1, 0, 0, 1, 0, 1, 1, 1, 1];
        let encoded = enc(&input);
        assert_eq!(encoded, vec![0x06, 0x03, 0x2F]);
        assert_eq!(decode(&encoded).unwrap(), bits(&input));
    }

    #[test]
    fn test_decode_tolerates_whole_padding_byte() {
        // empty sequence with a full byte of declared padding
        assert_eq!(decode(&[0x08]).unwrap(), Vec::<bool>::new());
        // 8 bits preceded by a whole padding byte
        assert_eq!(decode(&[0x08, 0x00, 0xAB]).unwrap(), bits(&[1, 0, 1, 0, 1, 0, 1, 1]));
        assert_eq!(decode(&[]).unwrap(), Vec::<bool>::new());
    }

    #[test]
    fn test_decode_rejects_excess_padding() {
        let err = decode(&[0x09, 0xFF]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedBitmap {
                unused: 9,
                available: 8
            }
        ));
    }
}
