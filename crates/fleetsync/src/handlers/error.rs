use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fleetsync_core::storage::{repository_error_to_status_code, RepositoryError};

/// Error returned by every handler.
///
/// Wraps `anyhow::Error` so handlers can use `?` on any error type.
/// Repository errors keep their status code; anything else is a 500.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, "Application error");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_of(err: impl Into<anyhow::Error>) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_repository_errors_keep_their_status() {
        assert_eq!(
            status_of(RepositoryError::not_found("Fleet", Uuid::nil())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RepositoryError::constraint("Fleet", "phone already in use: 113")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(RepositoryError::ConnectionFailed("refused".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_other_errors_are_internal() {
        assert_eq!(
            status_of(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
