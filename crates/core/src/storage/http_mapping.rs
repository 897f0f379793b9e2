//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! Only `NotFound` is distinguishable by clients; every storage failure is a
//! generic server error so no backend detail leaks through the status code.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - everything else -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use tickbox_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::todo_not_found(1);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::ConnectionFailed(_)
        | RepositoryError::QueryFailed(_)
        | RepositoryError::ConstraintViolation(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::todo_not_found(1);
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_connection_failed_maps_to_500() {
        let error = RepositoryError::ConnectionFailed("refused".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_query_failed_maps_to_500() {
        let error = RepositoryError::QueryFailed("syntax error".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_constraint_violation_maps_to_500() {
        let error = RepositoryError::ConstraintViolation("NOT NULL".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }
}
