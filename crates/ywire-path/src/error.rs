//! Error types for path parsing and path algebra.

use thiserror::Error;

/// Errors produced while parsing or manipulating paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The textual path is malformed. `element` names the offending element.
    #[error("invalid path element {element:?}: {reason}")]
    Syntax { element: String, reason: String },

    /// The two paths of a binary operation hold different representations.
    #[error("path representation mismatch: {left} vs {right}")]
    RepresentationMismatch {
        left: &'static str,
        right: &'static str,
    },

    /// The candidate prefix is not an elementwise prefix of the path.
    #[error("{prefix} is not a prefix of {path}")]
    PrefixMismatch { path: String, prefix: String },

    /// An element index is past the end of the path.
    #[error("index {index} out of range for path of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The operation needs a structured (name + keys) path.
    #[error("operation requires a structured path, got {0}")]
    NotStructured(String),

    /// The operation needs at least one element.
    #[error("operation requires a non-empty path")]
    EmptyPath,

    /// A wire path populates both or neither representation inconsistently.
    #[error("invalid wire path: {0}")]
    InvalidWirePath(String),
}

impl PathError {
    pub(crate) fn syntax(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Syntax {
            element: element.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for path results.
pub type PathResult<T> = Result<T, PathError>;
