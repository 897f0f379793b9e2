use async_trait::async_trait;

use crate::todo::{NewTodo, Todo};

use super::Result;

/// Repository for todo persistence.
///
/// Implemented by the storage backends and by the cached decorator, which
/// wraps another `TodoRepository` and keeps the exact same contract.
/// Soft-deleted todos are invisible to every operation.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Inserts a todo, assigning its id and timestamps.
    async fn save(&self, todo: NewTodo) -> Result<Todo>;

    /// Gets a live todo by its id.
    ///
    /// Returns `RepositoryError::NotFound` when absent or soft-deleted.
    async fn find_by_id(&self, id: i64) -> Result<Todo>;

    /// Gets all live todos, newest first.
    async fn find_all(&self) -> Result<Vec<Todo>>;

    /// Overwrites the mutable fields of a live todo and refreshes `updated_at`.
    async fn update(&self, todo: &Todo) -> Result<Todo>;

    /// Soft-deletes a live todo. Deleting twice fails with `NotFound`.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
