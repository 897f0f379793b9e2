use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tickbox_core::storage::{repository_error_to_status_code, RepositoryError};
use tickbox_core::todo::TodoError;

use super::response::ApiResponse;

/// Handler error rendered as an envelope with `data: null`.
///
/// Internal causes are kept in `source` for logging only; clients see `message`.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn invalid_id() -> Self {
        Self::bad_request("Invalid ID format")
    }

    pub fn invalid_body() -> Self {
        Self::bad_request("Invalid request body")
    }

    pub fn request_canceled() -> Self {
        Self::new(StatusCode::REQUEST_TIMEOUT, "Request canceled")
    }

    /// Maps a repository failure for one operation.
    ///
    /// `NotFound` becomes 404 "Todo not found"; anything else answers with
    /// `failure_message` and keeps the cause for the log.
    pub fn from_repository(err: RepositoryError, failure_message: &str) -> Self {
        let status = StatusCode::from_u16(repository_error_to_status_code(&err))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status == StatusCode::NOT_FOUND {
            return Self::new(status, "Todo not found");
        }

        Self {
            status,
            message: failure_message.to_string(),
            source: Some(err.into()),
        }
    }
}

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(source) = &self.source {
            tracing::error!(status = %self.status, error = %source, "{}", self.message);
        }

        ApiResponse::message(self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::from_repository(RepositoryError::todo_not_found(3), "Failed");

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Todo not found");
        assert!(err.source.is_none());
    }

    #[test]
    fn test_storage_failure_hides_details() {
        let err = AppError::from_repository(
            RepositoryError::QueryFailed("disk I/O error".to_string()),
            "Failed to update todo",
        );

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to update todo");
        assert!(err.source.is_some());
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let err = AppError::from(TodoError::EmptyTitle);

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Todo title cannot be empty");
    }
}
