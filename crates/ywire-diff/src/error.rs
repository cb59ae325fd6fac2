//! Error types for the diff crate.

use ywire_walk::WalkError;

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The two trees are not of the same node type.
    #[error("cannot diff {original} against {modified}: types differ")]
    TypeMismatch {
        original: &'static str,
        modified: &'static str,
    },

    /// Flattening one of the trees failed.
    #[error("walk failed: {0}")]
    Walk(#[from] WalkError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
