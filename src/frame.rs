// SPDX-License-Identifier: MIT
//! Envelope framing
//!
//! ```text
//! Frame header (5 bytes, big-endian):
//! - Key: element key (2 bytes)
//! - Type: type tag (1 byte)
//! - Length: payload length (2 bytes)
//!
//! Payload: `length` bytes
//! ```
//!
//! Frames concatenate with no separator or trailer; the end of the buffer is
//! the end of the record.

use bytes::{Buf, BufMut};

use crate::format::{Tag, HEADER_SIZE, MAX_PAYLOAD_LEN};
use crate::reader::DecodeError;
use crate::writer::EncodeError;

/// One frame borrowed from an encoded buffer
///
/// The type byte is kept raw so that frames with unknown tags can still be
/// walked over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub key: u16,
    pub tag: u8,
    pub payload: &'a [u8],
}

impl Frame<'_> {
    /// Known tag, if the type byte is recognized
    #[inline]
    pub fn tag(&self) -> Option<Tag> {
        Tag::from_u8(self.tag)
    }

    /// Size of this frame on the wire
    #[inline]
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Append a header and payload, rejecting payloads longer than `max_payload_len`
///
/// A cap above [`MAX_PAYLOAD_LEN`] is clamped to it, since the length field
/// cannot describe more.
#[inline]
pub(crate) fn put_frame<B: BufMut>(
    out: &mut B,
    key: u16,
    tag: u8,
    payload: &[u8],
    max_payload_len: usize,
) -> Result<(), EncodeError> {
    let max = max_payload_len.min(MAX_PAYLOAD_LEN);
    if payload.len() > max {
        return Err(EncodeError::PayloadTooLarge {
            len: payload.len(),
            max,
        });
    }

    out.put_u16(key);
    out.put_u8(tag);
    out.put_u16(payload.len() as u16);
    out.put_slice(payload);
    Ok(())
}

/// Frame a single payload
pub fn frame(key: u16, tag: Tag, payload: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    put_frame(&mut out, key, tag.as_u8(), payload, MAX_PAYLOAD_LEN)?;
    Ok(out)
}

/// Split a buffer into all of its frames
///
/// Fails on the first truncated header or payload; nothing is returned for
/// a partially valid buffer.
pub fn unframe_all(buffer: &[u8]) -> Result<Vec<Frame<'_>>, DecodeError> {
    Frames::new(buffer).collect()
}

/// Iterator over the frames of a buffer
///
/// Yields at most one error, then stops.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    buffer: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Frames<'a> {
    #[inline]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            failed: false,
        }
    }

    /// Byte offset of the next frame
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Remaining bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    fn read_frame(&mut self) -> Result<Frame<'a>, DecodeError> {
        let buffer: &'a [u8] = self.buffer;
        let mut rest = &buffer[self.offset..];
        if rest.len() < HEADER_SIZE {
            return Err(DecodeError::TruncatedHeader {
                offset: self.offset,
                remaining: rest.len(),
            });
        }

        let key = rest.get_u16();
        let tag = rest.get_u8();
        let len = rest.get_u16() as usize;
        if rest.len() < len {
            return Err(DecodeError::TruncatedPayload {
                key,
                tag,
                expected: len,
                available: rest.len(),
            });
        }

        let frame = Frame {
            key,
            tag,
            payload: &rest[..len],
        };
        self.offset += frame.encoded_len();
        tracing::trace!(key, tag, len, offset = self.offset, "frame read");
        Ok(frame)
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = Result<Frame<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.buffer.len() {
            return None;
        }

        let result = self.read_frame();
        self.failed = result.is_err();
        Some(result)
    }
}

impl std::iter::FusedIterator for Frames<'_> {}
