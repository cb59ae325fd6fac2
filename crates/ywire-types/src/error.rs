//! Error types for the value model.

use thiserror::Error;

/// Errors produced when resolving values of the tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// An enum holds a number its type's table does not define.
    #[error("unknown value {number} for enum {type_name}")]
    UnknownEnum {
        type_name: &'static str,
        number: i64,
    },

    /// A value of this kind has no canonical key-string form.
    #[error("cannot use a {kind} value as a list key")]
    UnsupportedKeyType { kind: &'static str },

    /// A list key field holds no value.
    #[error("list key field {0:?} is unset")]
    MissingKey(&'static str),

    /// A list member reported no key fields at all.
    #[error("list member {0} exposes no key fields")]
    EmptyKey(&'static str),

    /// An annotation failed to marshal or unmarshal.
    #[error("annotation codec error: {0}")]
    Annotation(String),
}

/// Convenience alias for value-model results.
pub type TypeResult<T> = Result<T, TypeError>;
