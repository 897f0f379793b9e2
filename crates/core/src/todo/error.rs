use thiserror::Error;

/// Errors that can occur when validating todo requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("Todo title cannot be empty")]
    EmptyTitle,
    #[error("Todo description must be at least {0} characters")]
    DescriptionTooShort(usize),
}
