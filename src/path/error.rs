use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("resolved path '{resolved}' for '{input}' contains a parent traversal")]
    InvalidParentTraversal { input: String, resolved: String },
}

pub type PathResult<T> = Result<T, PathError>;
