use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored todo item.
///
/// The `id` and timestamps are owned by the storage backend: they are
/// assigned on insert and only ever read back by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker. A set value means the todo is logically deleted.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Returns true if the todo carries a soft-delete marker.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Sets the title (useful for testing).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description (useful for testing).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the completion flag (useful for testing).
    pub fn with_done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }
}

/// A todo that has not been persisted yet.
///
/// Has no identifier or timestamps; the storage backend assigns both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub is_done: bool,
}

impl NewTodo {
    /// Creates a new, not yet completed, todo.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            is_done: false,
        }
    }

    /// Materializes this todo with a storage-assigned id and timestamp.
    pub fn into_todo(self, id: i64, now: DateTime<Utc>) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            is_done: self.is_done,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}
