//! Domain error types

use thiserror::Error;

/// Rejections raised before any model is contacted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestValidationError {
    #[error("At least one file is required")]
    NoFiles,
}

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] RequestValidationError),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
}
