use thiserror::Error;

/// Errors raised when an entity fails validation before it is persisted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("{field} too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },
}
