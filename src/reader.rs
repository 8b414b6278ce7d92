// SPDX-License-Identifier: MIT
//! Record reader: frame walking, tag lookup and payload decoding

use crate::config::UnknownTagPolicy;
use crate::format::Tag;
use crate::frame::{Frame, Frames};
use crate::registry::decode_payload;
use crate::value::Element;

/// Errors that can occur during decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("truncated header at byte {offset}: {remaining} bytes remain")]
    TruncatedHeader { offset: usize, remaining: usize },

    #[error("truncated payload for key {key} type {tag}: expected {expected} bytes, {available} available")]
    TruncatedPayload {
        key: u16,
        tag: u8,
        expected: usize,
        available: usize,
    },

    #[error("malformed {tag}: {reason}")]
    MalformedList { tag: Tag, reason: String },

    #[error("bad length for {tag}: expected {expected} bytes, got {actual}")]
    BadLength {
        tag: Tag,
        expected: usize,
        actual: usize,
    },

    #[error("malformed bitmap: {unused} padding bits but only {available} bits present")]
    MalformedBitmap { unused: u8, available: usize },

    #[error("unknown type {tag} for key {key}")]
    UnknownTag { key: u16, tag: u8 },
}

/// Lazy element iterator over an encoded record
///
/// Frames with unrecognized tags are skipped or rejected according to the
/// policy. Yields at most one error, then stops.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    frames: Frames<'a>,
    unknown_tags: UnknownTagPolicy,
    failed: bool,
}

impl<'a> Decoder<'a> {
    /// Decode with the default policy of skipping unknown tags
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_policy(buffer, UnknownTagPolicy::default())
    }

    pub fn with_policy(buffer: &'a [u8], unknown_tags: UnknownTagPolicy) -> Self {
        Self {
            frames: Frames::new(buffer),
            unknown_tags,
            failed: false,
        }
    }

    /// Byte offset of the next frame
    #[inline]
    pub fn offset(&self) -> usize {
        self.frames.offset()
    }

    fn next_element(&mut self) -> Option<Result<Element, DecodeError>> {
        loop {
            let frame = match self.frames.next()? {
                Ok(frame) => frame,
                Err(e) => return Some(Err(e)),
            };
            match decode_frame(frame, self.unknown_tags) {
                Ok(Some(element)) => return Some(Ok(element)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Element, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_element();
        self.failed = matches!(item, Some(Err(_)));
        item
    }
}

impl std::iter::FusedIterator for Decoder<'_> {}

/// Decode one frame, returning `None` for a skipped unknown tag
pub fn decode_frame(
    frame: Frame<'_>,
    unknown_tags: UnknownTagPolicy,
) -> Result<Option<Element>, DecodeError> {
    let Some(tag) = frame.tag() else {
        return match unknown_tags {
            UnknownTagPolicy::Skip => {
                tracing::debug!(
                    key = frame.key,
                    tag = frame.tag,
                    len = frame.payload.len(),
                    "skipping element with unknown type"
                );
                Ok(None)
            }
            UnknownTagPolicy::Reject => Err(DecodeError::UnknownTag {
                key: frame.key,
                tag: frame.tag,
            }),
        };
    };

    let value = decode_payload(tag, frame.payload)?;
    Ok(Some(Element {
        key: frame.key,
        tag,
        value,
    }))
}

/// Find the first element with `key` among the first `max` frames
///
/// Only the matching frame's payload is decoded. Returns `Ok(None)` when the
/// key does not appear within the limit or before the end of the buffer.
pub fn search(
    buffer: &[u8],
    key: u16,
    max: usize,
    unknown_tags: UnknownTagPolicy,
) -> Result<Option<Element>, DecodeError> {
    for frame in Frames::new(buffer).take(max) {
        let frame = frame?;
        if frame.key != key {
            continue;
        }
        if let Some(element) = decode_frame(frame, unknown_tags)? {
            return Ok(Some(element));
        }
    }
    Ok(None)
}
