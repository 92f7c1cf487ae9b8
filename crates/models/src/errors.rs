use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown resource type: {0:?}")]
    UnknownResource(String),
    #[error("validation error: {0}")]
    Validation(String),
}
