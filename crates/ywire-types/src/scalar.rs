//! Resolved scalar values.
//!
//! A [`Scalar`] is what every leaf ultimately resolves to once enums and
//! unions have been looked through. Equality is "as rendered": floats compare
//! by bit pattern, so a tree always compares equal to itself even when it
//! holds a NaN.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{TypeError, TypeResult};

/// A primitive leaf value.
#[derive(Clone, Debug)]
pub enum Scalar {
    String(String),
    Bool(bool),
    /// The YANG `empty` type. Only the set state is ever represented.
    Empty,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Binary(Vec<u8>),
}

impl Scalar {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Empty => "empty",
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Uint8(_) => "uint8",
            Self::Uint16(_) => "uint16",
            Self::Uint32(_) => "uint32",
            Self::Uint64(_) => "uint64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Binary(_) => "binary",
        }
    }

    /// Canonical string form used for list keys.
    ///
    /// Booleans render as `true`/`false`, integers in decimal and binary as
    /// standard base64. Floats and `empty` have no key form.
    pub fn to_key_string(&self) -> TypeResult<String> {
        Ok(match self {
            Self::String(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Int8(v) => v.to_string(),
            Self::Int16(v) => v.to_string(),
            Self::Int32(v) => v.to_string(),
            Self::Int64(v) => v.to_string(),
            Self::Uint8(v) => v.to_string(),
            Self::Uint16(v) => v.to_string(),
            Self::Uint32(v) => v.to_string(),
            Self::Uint64(v) => v.to_string(),
            Self::Binary(b) => STANDARD.encode(b),
            Self::Empty | Self::Float32(_) | Self::Float64(_) => {
                return Err(TypeError::UnsupportedKeyType { kind: self.kind() })
            }
        })
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Empty, Self::Empty) => true,
            (Self::Int8(a), Self::Int8(b)) => a == b,
            (Self::Int16(a), Self::Int16(b)) => a == b,
            (Self::Int32(a), Self::Int32(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::Uint8(a), Self::Uint8(b)) => a == b,
            (Self::Uint16(a), Self::Uint16(b)) => a == b,
            (Self::Uint32(a), Self::Uint32(b)) => a == b,
            (Self::Uint64(a), Self::Uint64(b)) => a == b,
            (Self::Float32(a), Self::Float32(b)) => a.to_bits() == b.to_bits(),
            (Self::Float64(a), Self::Float64(b)) => a.to_bits() == b.to_bits(),
            (Self::Binary(a), Self::Binary(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}
