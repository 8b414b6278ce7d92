// SPDX-License-Identifier: MIT
//! Configured codec entry point

use std::io::Write;

use crate::config::CodecConfig;
use crate::dict::Dict;
use crate::reader::{self, DecodeError, Decoder};
use crate::value::Element;
use crate::writer::{self, EncodeError, Encoder};

/// Encoder and decoder bound to one [`CodecConfig`]
///
/// Holds no state besides its configuration; a single instance can be
/// shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a config as given; a payload cap above 65535 is clamped when framing
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Bind a config after checking it with [`CodecConfig::validate`]
    pub fn try_with_config(config: CodecConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Start an incremental encoder with this codec's limits
    pub fn encoder(&self) -> Encoder {
        Encoder::with_config(&self.config)
    }

    /// Encode elements in order
    ///
    /// Fails on the first element that cannot be encoded; no partial output
    /// is returned.
    pub fn encode<'e, I>(&self, elements: I) -> Result<Vec<u8>, EncodeError>
    where
        I: IntoIterator<Item = &'e Element>,
    {
        let mut encoder = self.encoder();
        for element in elements {
            encoder.add_element(element)?;
        }
        Ok(encoder.finalize())
    }

    /// Encode one element as a single frame
    pub fn encode_element(&self, element: &Element) -> Result<Vec<u8>, EncodeError> {
        let mut encoder = self.encoder();
        encoder.add_element(element)?;
        Ok(encoder.finalize())
    }

    /// Stream elements to `out` frame by frame, returning the bytes written
    ///
    /// Frames already written before a failing element stay written.
    pub fn write_to<'e, W, I>(&self, out: &mut W, elements: I) -> Result<usize, EncodeError>
    where
        W: Write,
        I: IntoIterator<Item = &'e Element>,
    {
        let mut written = 0;
        for element in elements {
            written += writer::write_element(&mut *out, element, &self.config)?;
        }
        Ok(written)
    }

    /// Lazily decode a buffer
    pub fn elements<'a>(&self, buffer: &'a [u8]) -> Decoder<'a> {
        Decoder::with_policy(buffer, self.config.unknown_tags)
    }

    /// Decode a buffer into its elements, keeping order and duplicates
    pub fn decode(&self, buffer: &[u8]) -> Result<Vec<Element>, DecodeError> {
        self.elements(buffer).collect()
    }

    /// Decode a buffer into a key-indexed map; the last occurrence of a key wins
    pub fn decode_to_map(&self, buffer: &[u8]) -> Result<Dict, DecodeError> {
        self.elements(buffer).collect()
    }

    /// Find the first element with `key` within the first `max` frames
    pub fn search(&self, buffer: &[u8], key: u16, max: usize) -> Result<Option<Element>, DecodeError> {
        reader::search(buffer, key, max, self.config.unknown_tags)
    }
}
