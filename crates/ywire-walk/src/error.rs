//! Error types for tree walks.

use thiserror::Error;
use ywire_path::PathError;
use ywire_types::TypeError;

/// Errors that abort a tree walk.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WalkError {
    /// A path could not be formed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A value could not be resolved.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// The field declares no schema path at all.
    #[error("field {field} of {node} has no schema path")]
    MissingPathAnnotation {
        node: &'static str,
        field: &'static str,
    },

    /// The field is a list of containers with no key.
    #[error("unimplemented: field {field} of {node} is a list without keys")]
    UnsupportedShape {
        node: &'static str,
        field: &'static str,
    },

    /// Several sibling fields failed.
    #[error("{} errors: {}", .0.len(), join(.0))]
    Multiple(Vec<WalkError>),
}

fn join(errors: &[WalkError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error types that can fold the failures of sibling fields into one.
pub trait Aggregate: Sized {
    fn aggregate(errors: Vec<Self>) -> Self;
}

impl Aggregate for WalkError {
    fn aggregate(errors: Vec<Self>) -> Self {
        Self::Multiple(errors)
    }
}

/// `Ok` when nothing failed, the lone error when one did, an aggregate
/// otherwise.
pub fn finish<E: Aggregate>(mut errors: Vec<E>) -> Result<(), E> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(E::aggregate(errors)),
    }
}

/// Convenience alias for walk results.
pub type WalkResult<T> = Result<T, WalkError>;
