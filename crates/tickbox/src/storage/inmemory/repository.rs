//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use tickbox_core::storage::{RepositoryError, Result, TodoRepository};
use tickbox_core::todo::{NewTodo, Todo};

/// Rows plus the id sequence, guarded together so ids stay unique.
#[derive(Debug, Default)]
struct Table {
    todos: BTreeMap<i64, Todo>,
    last_id: i64,
}

impl Table {
    fn live_mut(&mut self, id: i64) -> Result<&mut Todo> {
        self.todos
            .get_mut(&id)
            .filter(|todo| !todo.is_deleted())
            .ok_or_else(|| RepositoryError::todo_not_found(id))
    }
}

/// In-memory storage backend for testing.
///
/// Data is not persisted and will be lost when the repository is dropped.
/// Soft-deleted rows are kept so ids are never reused.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn save(&self, todo: NewTodo) -> Result<Todo> {
        if todo.title.is_empty() {
            return Err(RepositoryError::ConstraintViolation(
                "todos.title must not be empty".to_string(),
            ));
        }

        let mut table = self.table.write().await;
        table.last_id += 1;
        let todo = todo.into_todo(table.last_id, Utc::now());
        table.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: i64) -> Result<Todo> {
        let table = self.table.read().await;
        table
            .todos
            .get(&id)
            .filter(|todo| !todo.is_deleted())
            .cloned()
            .ok_or_else(|| RepositoryError::todo_not_found(id))
    }

    async fn find_all(&self) -> Result<Vec<Todo>> {
        let table = self.table.read().await;
        let mut todos: Vec<Todo> = table
            .todos
            .values()
            .filter(|todo| !todo.is_deleted())
            .cloned()
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(todos)
    }

    async fn update(&self, todo: &Todo) -> Result<Todo> {
        let mut table = self.table.write().await;
        let stored = table.live_mut(todo.id)?;

        stored.title = todo.title.clone();
        stored.description = todo.description.clone();
        stored.is_done = todo.is_done;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut table = self.table.write().await;
        let stored = table.live_mut(id)?;
        let now = Utc::now();
        stored.deleted_at = Some(now);
        stored.updated_at = now;
        Ok(())
    }
}
