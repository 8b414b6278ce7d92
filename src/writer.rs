// SPDX-License-Identifier: MIT
//! Record writer: element validation, payload encoding and framing

use std::io::Write;

use crate::config::CodecConfig;
use crate::format::{Tag, HEADER_SIZE};
use crate::frame::put_frame;
use crate::registry::encode_payload;
use crate::value::{Element, Value};

/// Errors that can occur during encoding
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("value {value} out of range for {tag}")]
    Range { tag: Tag, value: i128 },

    #[error("payload of {len} bytes exceeds maximum of {max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("{found} value cannot be encoded as {tag}")]
    TypeMismatch { tag: Tag, found: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builder for encoded records
///
/// Each [`add`](Encoder::add) validates and frames one element. A failed add
/// leaves the buffer as it was, so the builder can keep going.
#[derive(Debug, Clone)]
pub struct Encoder {
    buffer: Vec<u8>,
    scratch: Vec<u8>,
    max_payload_len: usize,
    count: usize,
}

impl Encoder {
    /// Create an encoder with the default configuration
    pub fn new() -> Self {
        Self::with_config(&CodecConfig::default())
    }

    /// Create an encoder honoring the config's payload cap
    ///
    /// The cap is clamped to [`crate::MAX_PAYLOAD_LEN`]; use
    /// [`CodecConfig::validate`] to reject such configs up front.
    pub fn with_config(config: &CodecConfig) -> Self {
        Self {
            buffer: Vec::new(),
            scratch: Vec::new(),
            max_payload_len: config.max_payload_len,
            count: 0,
        }
    }

    /// Encode and append one element
    pub fn add(&mut self, key: u16, tag: Tag, value: &Value) -> Result<(), EncodeError> {
        self.scratch.clear();
        let result = encode_payload(&mut self.scratch, tag, value).and_then(|()| {
            put_frame(
                &mut self.buffer,
                key,
                tag.as_u8(),
                &self.scratch,
                self.max_payload_len,
            )
        });

        match result {
            Ok(()) => {
                self.count += 1;
                tracing::trace!(key, %tag, len = self.scratch.len(), "element encoded");
                Ok(())
            }
            Err(error) => {
                tracing::debug!(key, %tag, %error, "element failed to encode");
                Err(error)
            }
        }
    }

    #[inline]
    pub fn add_element(&mut self, element: &Element) -> Result<(), EncodeError> {
        self.add(element.key, element.tag, &element.value)
    }

    /// Encoded size so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of elements added
    #[inline]
    pub fn element_count(&self) -> usize {
        self.count
    }

    /// Finish and return the encoded record
    pub fn finalize(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode one element and write its frame to `writer`
///
/// Returns the number of bytes written. Nothing is written if encoding fails.
pub fn write_element<W: Write>(
    writer: &mut W,
    element: &Element,
    config: &CodecConfig,
) -> Result<usize, EncodeError> {
    let mut payload = Vec::new();
    encode_payload(&mut payload, element.tag, &element.value)?;

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    put_frame(
        &mut frame,
        element.key,
        element.tag.as_u8(),
        &payload,
        config.max_payload_len,
    )?;

    writer.write_all(&frame)?;
    Ok(frame.len())
}
