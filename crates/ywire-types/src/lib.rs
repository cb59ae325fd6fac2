//! Value model and schema boundary for ywire.
//!
//! The typed tree is produced by generated code; this crate defines the
//! contract that code implements and the erased values the encoders read.
//!
//! # Key Types
//!
//! - [`Scalar`] -- A resolved primitive value (string, bool, integers, floats, binary, empty)
//! - [`Leaf`] -- A leaf before resolution: scalar, enum ([`EnumValue`]), or union member
//! - [`FieldDescriptor`] -- Static per-field metadata: paths, shadow paths, modules
//! - [`Node`] / [`KeyedNode`] -- Implemented by every container and list member type
//! - [`Value`] -- The erased value of a present field
//! - [`Annotation`] -- Out-of-band metadata marshaled as opaque JSON

pub mod annotation;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod leaf;
pub mod scalar;
pub mod schema;

pub use annotation::{unmarshal_annotation, Annotation};
pub use error::{TypeError, TypeResult};
pub use leaf::{Empty, EnumEntry, EnumKind, EnumValue, Leaf, ToLeaf, YangEnum};
pub use scalar::Scalar;
pub use schema::{
    access, FieldDescriptor, KeyedMembers, KeyedNode, ListKey, ListMember, Node, Value,
};
