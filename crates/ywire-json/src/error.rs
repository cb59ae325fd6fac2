use thiserror::Error;
use ywire_types::TypeError;
use ywire_walk::{Aggregate, WalkError};

#[derive(Debug, Error)]
pub enum JsonError {
    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Type(#[from] TypeError),

    /// The internal dialect keeps numbers as JSON numbers, which cannot hold
    /// NaN or infinities.
    #[error("non-finite float at {path}")]
    NonFiniteFloat { path: String },

    /// Two fields map to the same document key with incompatible values.
    #[error("conflicting values for key {key:?} at {path}")]
    Conflict { path: String, key: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("{} errors: {}", .0.len(), join(.0))]
    Multiple(Vec<JsonError>),
}

fn join(errors: &[JsonError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Aggregate for JsonError {
    fn aggregate(errors: Vec<Self>) -> Self {
        Self::Multiple(errors)
    }
}

pub type JsonResult<T> = Result<T, JsonError>;
