//! API request types for todo operations.
//!
//! Following the Functional Core pattern, these are pure data types with no I/O.

use serde::{Deserialize, Serialize};

use super::types::{NewTodo, Todo};

/// Request payload for creating a new todo.
///
/// Missing fields deserialize as empty strings so that validation, not the
/// JSON decoder, reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl CreateTodoRequest {
    /// Create a new request.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Convert into a `NewTodo`. The completion flag always starts as false.
    pub fn into_new_todo(self) -> NewTodo {
        NewTodo::new(self.title, self.description)
    }
}

/// Request payload for a partial todo update.
///
/// `is_done` is tri-state: `None` leaves the flag untouched, while
/// `Some(false)` explicitly clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

impl UpdateTodoRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the completion flag.
    pub fn with_done(mut self, is_done: bool) -> Self {
        self.is_done = Some(is_done);
        self
    }

    /// Apply updates to an existing todo.
    ///
    /// Empty strings count as "not supplied": an update cannot clear the
    /// title or description.
    pub fn apply_to(self, todo: &mut Todo) {
        if let Some(title) = self.title.filter(|t| !t.is_empty()) {
            todo.title = title;
        }
        if let Some(description) = self.description.filter(|d| !d.is_empty()) {
            todo.description = description;
        }
        if let Some(is_done) = self.is_done {
            todo.is_done = is_done;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn existing_todo() -> Todo {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        NewTodo::new("A", "B").into_todo(1, now)
    }

    #[test]
    fn test_create_request_into_new_todo() {
        let todo = CreateTodoRequest::new("Buy milk", "2 liters, oat").into_new_todo();

        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, "2 liters, oat");
        assert!(!todo.is_done);
    }

    #[test]
    fn test_create_request_missing_fields_default_to_empty() {
        let request: CreateTodoRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_empty());
        assert!(request.description.is_empty());
    }

    #[test]
    fn test_apply_skips_empty_description_and_applies_done() {
        let mut todo = existing_todo();
        let update = UpdateTodoRequest::new().with_description("").with_done(true);

        update.apply_to(&mut todo);

        assert_eq!(todo.title, "A");
        assert_eq!(todo.description, "B");
        assert!(todo.is_done);
    }

    #[test]
    fn test_apply_explicit_false_clears_done() {
        let mut todo = existing_todo().with_done(true);

        UpdateTodoRequest::new().with_done(false).apply_to(&mut todo);

        assert!(!todo.is_done);
    }

    #[test]
    fn test_apply_omitted_done_is_untouched() {
        let mut todo = existing_todo().with_done(true);

        UpdateTodoRequest::new().with_title("New").apply_to(&mut todo);

        assert_eq!(todo.title, "New");
        assert!(todo.is_done);
    }

    #[test]
    fn test_apply_empty_title_is_ignored() {
        let mut todo = existing_todo();

        UpdateTodoRequest::new().with_title("").apply_to(&mut todo);

        assert_eq!(todo.title, "A");
    }

    #[test]
    fn test_update_request_distinguishes_null_from_false() {
        let omitted: UpdateTodoRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        let explicit: UpdateTodoRequest = serde_json::from_str(r#"{"is_done":false}"#).unwrap();

        assert_eq!(omitted.is_done, None);
        assert_eq!(explicit.is_done, Some(false));
    }
}
