use thiserror::Error;
use ywire_path::PathError;
use ywire_walk::WalkError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("walk failed: {0}")]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Path(#[from] PathError),
}

pub type RenderResult<T> = Result<T, RenderError>;
