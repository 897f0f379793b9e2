use super::error::TodoError;
use super::requests::CreateTodoRequest;

/// Minimum length of a todo description, in characters.
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Validates a create request before it reaches the service.
pub fn validate_create_request(request: &CreateTodoRequest) -> Result<(), TodoError> {
    if request.title.is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    if request.description.chars().count() < MIN_DESCRIPTION_LENGTH {
        return Err(TodoError::DescriptionTooShort(MIN_DESCRIPTION_LENGTH));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = CreateTodoRequest::new("Buy milk", "2 liters, oat");
        assert_eq!(validate_create_request(&request), Ok(()));
    }

    #[test]
    fn test_empty_title_rejected() {
        let request = CreateTodoRequest::new("", "2 liters, oat");
        assert_eq!(
            validate_create_request(&request),
            Err(TodoError::EmptyTitle)
        );
    }

    #[test]
    fn test_whitespace_title_accepted() {
        let request = CreateTodoRequest::new("   ", "2 liters, oat");
        assert_eq!(validate_create_request(&request), Ok(()));
    }

    #[test]
    fn test_long_title_accepted() {
        let request = CreateTodoRequest::new("x".repeat(201), "2 liters, oat");
        assert_eq!(validate_create_request(&request), Ok(()));
    }

    #[test]
    fn test_short_description_rejected() {
        let request = CreateTodoRequest::new("Buy milk", "oat");
        assert_eq!(
            validate_create_request(&request),
            Err(TodoError::DescriptionTooShort(10))
        );
    }

    #[test]
    fn test_description_length_counts_characters() {
        // Ten characters, more than ten bytes.
        let request = CreateTodoRequest::new("Kaufen", "Hafermilch");
        assert_eq!(validate_create_request(&request), Ok(()));

        let request = CreateTodoRequest::new("Kaufen", "äöüäöüäöüä");
        assert_eq!(validate_create_request(&request), Ok(()));
    }
}
