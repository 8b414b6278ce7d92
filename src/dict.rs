// SPDX-License-Identifier: MIT
//! Key-indexed record view
//!
//! A [`Dict`] holds at most one `(tag, value)` per key. Building one from a
//! sequence keeps the last occurrence of a repeated key. Typed getters match
//! on the stored tag exactly: a `UINT16` element is not readable as `u32`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::format::Tag;
use crate::value::{Element, Value};
use crate::writer::{EncodeError, Encoder};

/// Errors from typed dictionary lookups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("element {key} not found")]
    NotFound { key: u16 },

    #[error("element {key} is {found}, expected {expected}")]
    TypeMismatch { key: u16, expected: Tag, found: Tag },

    #[error("element {key} holds a value that is not a valid {tag}")]
    InvalidValue { key: u16, tag: Tag },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dict {
    entries: BTreeMap<u16, (Tag, Value)>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the element at `key`, returning the previous one
    pub fn insert(&mut self, key: u16, tag: Tag, value: impl Into<Value>) -> Option<(Tag, Value)> {
        self.entries.insert(key, (tag, value.into()))
    }

    pub fn get(&self, key: u16) -> Option<(Tag, &Value)> {
        self.entries.get(&key).map(|(tag, value)| (*tag, value))
    }

    pub fn remove(&mut self, key: u16) -> Option<(Tag, Value)> {
        self.entries.remove(&key)
    }

    #[inline]
    pub fn contains_key(&self, key: u16) -> bool {
        self.entries.contains_key(&key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (u16, Tag, &Value)> + '_ {
        self.entries
            .iter()
            .map(|(&key, (tag, value))| (key, *tag, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.keys().copied()
    }

    /// Elements in ascending key order
    pub fn to_elements(&self) -> Vec<Element> {
        self.iter()
            .map(|(key, tag, value)| Element {
                key,
                tag,
                value: value.clone(),
            })
            .collect()
    }

    /// Encode as a record, frames in ascending key order
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut encoder = Encoder::new();
        for (key, tag, value) in self.iter() {
            encoder.add(key, tag, value)?;
        }
        Ok(encoder.finalize())
    }

    fn typed(&self, key: u16, expected: Tag) -> Result<&Value, LookupError> {
        match self.entries.get(&key) {
            Some((tag, value)) if *tag == expected => Ok(value),
            Some((tag, _)) => Err(LookupError::TypeMismatch {
                key,
                expected,
                found: *tag,
            }),
            None => Err(LookupError::NotFound { key }),
        }
    }

    fn convert<'a, T>(
        &'a self,
        key: u16,
        tag: Tag,
        f: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, LookupError> {
        f(self.typed(key, tag)?).ok_or(LookupError::InvalidValue { key, tag })
    }

    fn int_list<T: TryFrom<i128>>(&self, key: u16, tag: Tag) -> Result<Vec<T>, LookupError> {
        self.convert(key, tag, |v| {
            v.as_ints()?
                .iter()
                .map(|&n| T::try_from(n).ok())
                .collect::<Option<Vec<T>>>()
        })
    }

    pub fn get_bool(&self, key: u16) -> Result<bool, LookupError> {
        self.convert(key, Tag::Bool, |v| match v {
            Value::Bool(b) => Some(*b),
            Value::Int(n) => Some(*n != 0),
            _ => None,
        })
    }

    pub fn get_u8(&self, key: u16) -> Result<u8, LookupError> {
        self.convert(key, Tag::Uint8, Value::as_u8)
    }

    pub fn get_u16(&self, key: u16) -> Result<u16, LookupError> {
        self.convert(key, Tag::Uint16, Value::as_u16)
    }

    pub fn get_u32(&self, key: u16) -> Result<u32, LookupError> {
        self.convert(key, Tag::Uint32, Value::as_u32)
    }

    pub fn get_u64(&self, key: u16) -> Result<u64, LookupError> {
        self.convert(key, Tag::Uint64, Value::as_u64)
    }

    pub fn get_i64(&self, key: u16) -> Result<i64, LookupError> {
        self.convert(key, Tag::Int64, Value::as_i64)
    }

    pub fn get_f64(&self, key: u16) -> Result<f64, LookupError> {
        self.convert(key, Tag::Double, Value::as_f64)
    }

    /// STRING element as UTF-8
    pub fn get_str(&self, key: u16) -> Result<&str, LookupError> {
        self.convert(key, Tag::String, Value::as_str)
    }

    /// STRING element as raw bytes
    pub fn get_bytes(&self, key: u16) -> Result<&[u8], LookupError> {
        self.convert(key, Tag::String, Value::as_bytes)
    }

    pub fn get_bits(&self, key: u16) -> Result<&[bool], LookupError> {
        self.convert(key, Tag::Bitmap, Value::as_bits)
    }

    pub fn get_u8_list(&self, key: u16) -> Result<Vec<u8>, LookupError> {
        self.int_list(key, Tag::ListOfUint8)
    }

    pub fn get_u32_list(&self, key: u16) -> Result<Vec<u32>, LookupError> {
        self.int_list(key, Tag::ListOfUint32)
    }

    pub fn get_u64_list(&self, key: u16) -> Result<Vec<u64>, LookupError> {
        self.int_list(key, Tag::ListOfUint64)
    }

    pub fn get_f64_list(&self, key: u16) -> Result<&[f64], LookupError> {
        self.convert(key, Tag::ListOfDouble, Value::as_doubles)
    }

    /// LIST_OF_STRING element, every entry valid UTF-8
    pub fn get_strings(&self, key: u16) -> Result<Vec<&str>, LookupError> {
        self.convert(key, Tag::ListOfString, |v| {
            v.as_byte_strings()?
                .iter()
                .map(|b| std::str::from_utf8(b).ok())
                .collect::<Option<Vec<&str>>>()
        })
    }

    pub fn get_bool_or(&self, key: u16, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    pub fn get_u8_or(&self, key: u16, default: u8) -> u8 {
        self.get_u8(key).unwrap_or(default)
    }

    pub fn get_u16_or(&self, key: u16, default: u16) -> u16 {
        self.get_u16(key).unwrap_or(default)
    }

    pub fn get_u32_or(&self, key: u16, default: u32) -> u32 {
        self.get_u32(key).unwrap_or(default)
    }

    pub fn get_u64_or(&self, key: u16, default: u64) -> u64 {
        self.get_u64(key).unwrap_or(default)
    }

    pub fn get_i64_or(&self, key: u16, default: i64) -> i64 {
        self.get_i64(key).unwrap_or(default)
    }

    pub fn get_f64_or(&self, key: u16, default: f64) -> f64 {
        self.get_f64(key).unwrap_or(default)
    }

    pub fn get_str_or<'a>(&'a self, key: u16, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    pub fn get_bytes_or<'a>(&'a self, key: u16, default: &'a [u8]) -> &'a [u8] {
        self.get_bytes(key).unwrap_or(default)
    }

    pub fn get_bits_or<'a>(&'a self, key: u16, default: &'a [bool]) -> &'a [bool] {
        self.get_bits(key).unwrap_or(default)
    }

    pub fn get_u8_list_or(&self, key: u16, default: Vec<u8>) -> Vec<u8> {
        self.get_u8_list(key).unwrap_or(default)
    }

    pub fn get_u32_list_or(&self, key: u16, default: Vec<u32>) -> Vec<u32> {
        self.get_u32_list(key).unwrap_or(default)
    }

    pub fn get_u64_list_or(&self, key: u16, default: Vec<u64>) -> Vec<u64> {
        self.get_u64_list(key).unwrap_or(default)
    }

    pub fn get_f64_list_or<'a>(&'a self, key: u16, default: &'a [f64]) -> &'a [f64] {
        self.get_f64_list(key).unwrap_or(default)
    }

    pub fn get_strings_or<'a>(&'a self, key: u16, default: Vec<&'a str>) -> Vec<&'a str> {
        self.get_strings(key).unwrap_or(default)
    }
}

impl FromIterator<Element> for Dict {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut dict = Dict::new();
        dict.extend(iter);
        dict
    }
}

impl Extend<Element> for Dict {
    fn extend<I: IntoIterator<Item = Element>>(&mut self, iter: I) {
        for element in iter {
            self.entries.insert(element.key, (element.tag, element.value));
        }
    }
}

impl std::fmt::Display for Dict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, tag, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}({})={}", key, tag, value)?;
        }
        Ok(())
    }
}
