//! Todo service.
//!
//! Sits between the HTTP handlers and the repository. Its only logic is
//! defaulting on create and field merging on update; everything else is a
//! pass-through.

use std::sync::Arc;

use tickbox_core::storage::{Result, TodoRepository};
use tickbox_core::todo::{CreateTodoRequest, Todo, UpdateTodoRequest};

/// Todo operations over any `TodoRepository`, cached or not.
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// Creates a todo. New todos always start not done.
    pub async fn create(&self, request: CreateTodoRequest) -> Result<Todo> {
        self.repository.save(request.into_new_todo()).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Todo> {
        self.repository.find_by_id(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Todo>> {
        self.repository.find_all().await
    }

    /// Merges `request` into the current record and persists the result.
    ///
    /// Missing or empty `title`/`description` keep their stored values.
    pub async fn update(&self, id: i64, request: UpdateTodoRequest) -> Result<Todo> {
        let mut todo = self.repository.find_by_id(id).await?;
        request.apply_to(&mut todo);
        self.repository.update(&todo).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await
    }

    /// Probes the underlying store.
    pub async fn ping_storage(&self) -> Result<()> {
        self.repository.ping().await
    }
}
