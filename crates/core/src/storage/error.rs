use thiserror::Error;
use uuid::Uuid;

use crate::fleet::ValidationError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    /// A uniqueness or foreign-key constraint rejected the write.
    #[error("{entity_type} constraint violated: {reason}")]
    ConstraintViolation {
        entity_type: &'static str,
        reason: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Builds a `NotFound` error for an entity ID.
    pub fn not_found(entity_type: &'static str, id: Uuid) -> Self {
        RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Builds a `ConstraintViolation` error.
    pub fn constraint(entity_type: &'static str, reason: impl Into<String>) -> Self {
        RepositoryError::ConstraintViolation {
            entity_type,
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for RepositoryError {
    fn from(err: ValidationError) -> Self {
        RepositoryError::InvalidData(err.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Vehicle",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Vehicle not found: abc-123");
    }

    #[test]
    fn test_not_found_helper_formats_uuid() {
        let error = RepositoryError::not_found("Fleet", Uuid::nil());
        assert_eq!(
            error.to_string(),
            "Fleet not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_repository_error_constraint_violation_display() {
        let error = RepositoryError::constraint("Fleet", "phone already in use: 113");
        assert_eq!(
            error.to_string(),
            "Fleet constraint violated: phone already in use: 113"
        );
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout");
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("syntax error".to_string());
        assert_eq!(error.to_string(), "Query failed: syntax error");
    }

    #[test]
    fn test_repository_error_serialization_display() {
        let error = RepositoryError::Serialization("invalid JSON".to_string());
        assert_eq!(error.to_string(), "Serialization error: invalid JSON");
    }

    #[test]
    fn test_validation_error_becomes_invalid_data() {
        let error: RepositoryError = ValidationError::EmptyField("Fleet name").into();
        assert_eq!(
            error,
            RepositoryError::InvalidData("Fleet name cannot be empty".to_string())
        );
    }
}
