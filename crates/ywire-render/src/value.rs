//! Flattened leaf values and their protocol encoding.

use serde::{Deserialize, Serialize};
use ywire_types::Scalar;

/// The resolved value recorded for one path by the flattening walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeafValue {
    Scalar(Scalar),
    /// A leaf-list, in tree order.
    List(Vec<Scalar>),
}

/// Protocol-typed scalar carried in an update.
///
/// Integer widths collapse into the two 64-bit kinds and `float32` widens to
/// `Double`. The YANG `empty` type is sent as `Bool(true)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    String(String),
    Int(i64),
    Uint(u64),
    Double(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    LeafList(Vec<TypedValue>),
}

impl From<&Scalar> for TypedValue {
    fn from(s: &Scalar) -> Self {
        match s {
            Scalar::String(v) => Self::String(v.clone()),
            Scalar::Bool(v) => Self::Bool(*v),
            Scalar::Empty => Self::Bool(true),
            Scalar::Int8(v) => Self::Int(i64::from(*v)),
            Scalar::Int16(v) => Self::Int(i64::from(*v)),
            Scalar::Int32(v) => Self::Int(i64::from(*v)),
            Scalar::Int64(v) => Self::Int(*v),
            Scalar::Uint8(v) => Self::Uint(u64::from(*v)),
            Scalar::Uint16(v) => Self::Uint(u64::from(*v)),
            Scalar::Uint32(v) => Self::Uint(u64::from(*v)),
            Scalar::Uint64(v) => Self::Uint(*v),
            Scalar::Float32(v) => Self::Double(f64::from(*v)),
            Scalar::Float64(v) => Self::Double(*v),
            Scalar::Binary(v) => Self::Bytes(v.clone()),
        }
    }
}

/// Encode a flattened value into its protocol form.
pub fn encode_typed_value(value: &LeafValue) -> TypedValue {
    match value {
        LeafValue::Scalar(s) => TypedValue::from(s),
        LeafValue::List(items) => TypedValue::LeafList(items.iter().map(TypedValue::from).collect()),
    }
}
