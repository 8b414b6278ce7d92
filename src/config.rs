// SPDX-License-Identifier: MIT
//! Codec configuration

use serde::{Deserialize, Serialize};

use crate::format::MAX_PAYLOAD_LEN;

/// What a decoder does with a frame whose type tag it does not recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTagPolicy {
    /// Step over the frame using its declared length
    #[default]
    Skip,
    /// Fail with `DecodeError::UnknownTag`
    Reject,
}

impl std::fmt::Display for UnknownTagPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownTagPolicy::Skip => write!(f, "skip"),
            UnknownTagPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for UnknownTagPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(UnknownTagPolicy::Skip),
            "reject" => Ok(UnknownTagPolicy::Reject),
            _ => Err(format!("Invalid unknown tag policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest payload the encoder will frame
    pub max_payload_len: usize,
    pub unknown_tags: UnknownTagPolicy,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_payload_len: MAX_PAYLOAD_LEN,
            unknown_tags: UnknownTagPolicy::Skip,
        }
    }
}

impl CodecConfig {
    /// Strict decoding: unknown tags are errors
    pub fn strict() -> Self {
        Self {
            unknown_tags: UnknownTagPolicy::Reject,
            ..Self::default()
        }
    }

    /// Read `KTLV_MAX_PAYLOAD_LEN` and `KTLV_UNKNOWN_TAGS`, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_payload_len: std::env::var("KTLV_MAX_PAYLOAD_LEN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_payload_len),
            unknown_tags: std::env::var("KTLV_UNKNOWN_TAGS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.unknown_tags),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_payload_len > MAX_PAYLOAD_LEN {
            return Err(format!(
                "max_payload_len must be at most {} (16-bit length field)",
                MAX_PAYLOAD_LEN
            ));
        }

        Ok(())
    }
}
