// SPDX-License-Identifier: MIT
//! Element and value types
//!
//! A [`Value`] has no type of its own on the wire: the [`Tag`] paired with it
//! in an [`Element`] decides how it is encoded. Integers are carried as
//! `i128` so that any input, in range or not, can be checked against the
//! tag's domain before encoding.

use serde::{Deserialize, Serialize};

use crate::format::Tag;

/// Polymorphic element value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i128),
    Double(f64),
    Bytes(Vec<u8>),
    Bitmap(Vec<bool>),
    IntList(Vec<i128>),
    DoubleList(Vec<f64>),
    BytesList(Vec<Vec<u8>>),
}

impl Value {
    /// Build an integer list from any integer iterator
    pub fn ints<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<i128>,
    {
        Value::IntList(items.into_iter().map(Into::into).collect())
    }

    /// Build a string list from anything byte-like
    pub fn strings<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        Value::BytesList(items.into_iter().map(|s| s.as_ref().to_vec()).collect())
    }

    /// Build a bitmap from 0/1 digits; any nonzero digit is a set bit
    pub fn bits<I>(digits: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        Value::Bitmap(digits.into_iter().map(|d| d != 0).collect())
    }

    /// Shape name, used in type mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Double(_) => "double",
            Value::Bytes(_) => "bytes",
            Value::Bitmap(_) => "bitmap",
            Value::IntList(_) => "integer list",
            Value::DoubleList(_) => "double list",
            Value::BytesList(_) => "bytes list",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        self.as_int().and_then(|n| u8::try_from(n).ok())
    }

    pub fn as_u16(&self) -> Option<u16> {
        self.as_int().and_then(|n| u16::try_from(n).ok())
    }

    pub fn as_u32(&self) -> Option<u32> {
        self.as_int().and_then(|n| u32::try_from(n).ok())
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_int().and_then(|n| u64::try_from(n).ok())
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_int().and_then(|n| i32::try_from(n).ok())
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_int().and_then(|n| i64::try_from(n).ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// String payload as UTF-8, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_bits(&self) -> Option<&[bool]> {
        match self {
            Value::Bitmap(bits) => Some(bits),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&[i128]> {
        match self {
            Value::IntList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_doubles(&self) -> Option<&[f64]> {
        match self {
            Value::DoubleList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_byte_strings(&self) -> Option<&[Vec<u8>]> {
        match self {
            Value::BytesList(items) => Some(items),
            _ => None,
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(n as i128)
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, u64, i8, i16, i32, i64, i128);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Double(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bytes(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(s.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<bool>> for Value {
    fn from(bits: Vec<bool>) -> Self {
        Value::Bitmap(bits)
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Value::DoubleList(items)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Double(x) => write!(f, "{}", x),
            Value::Bytes(b) => write!(f, "{:?}", String::from_utf8_lossy(b)),
            Value::Bitmap(bits) => {
                f.write_str("<<")?;
                for &bit in bits {
                    f.write_str(if bit { "1" } else { "0" })?;
                }
                f.write_str(">>")
            }
            Value::IntList(items) => write!(f, "{:?}", items),
            Value::DoubleList(items) => write!(f, "{:?}", items),
            Value::BytesList(items) => {
                let strings: Vec<_> = items.iter().map(|b| String::from_utf8_lossy(b)).collect();
                write!(f, "{:?}", strings)
            }
        }
    }
}

/// One keyed, typed value of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub key: u16,
    pub tag: Tag,
    pub value: Value,
}

impl Element {
    pub fn new(key: u16, tag: Tag, value: impl Into<Value>) -> Self {
        Self {
            key,
            tag,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})={}", self.key, self.tag, self.value)
    }
}
