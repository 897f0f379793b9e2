//! SQLite repository implementation.
//!
//! Implements `TodoRepository` from `tickbox_core::storage` using SQLite.

use async_trait::async_trait;
use rusqlite::params;
use tokio_rusqlite::Connection;

use tickbox_core::storage::{RepositoryError, Result, TodoRepository};
use tickbox_core::todo::{NewTodo, Todo};

use super::conversions::{format_datetime, now, row_to_todo};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

const ENTITY_TYPE: &str = "Todo";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Reads back the live row with `id`, turning an absent row into `QueryReturnedNoRows`.
fn select_live_todo(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<Todo> {
    let mut stmt = conn.prepare_cached(schema::SELECT_TODO_BY_ID)?;
    stmt.query_row([id], row_to_todo)
}

/// SQLite-based repository implementation.
///
/// All statements run on the single background thread owned by
/// `tokio_rusqlite::Connection`, so writes are serialized.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl TodoRepository for SqliteRepository {
    async fn save(&self, todo: NewTodo) -> Result<Todo> {
        let created_at = now();
        let timestamp = format_datetime(&created_at);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TODO,
                    params![todo.title, todo.description, todo.is_done, timestamp],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                Ok(todo.into_todo(id, created_at))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY_TYPE))
    }

    async fn find_by_id(&self, id: i64) -> Result<Todo> {
        self.conn
            .call(move |conn| select_live_todo(conn, id).map_err(wrap_err))
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY_TYPE, id.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Todo>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_TODOS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_todo).map_err(wrap_err)?;

                let mut todos = Vec::new();
                for row_result in rows {
                    todos.push(row_result.map_err(wrap_err)?);
                }
                Ok(todos)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY_TYPE))
    }

    async fn update(&self, todo: &Todo) -> Result<Todo> {
        let id = todo.id;
        let title = todo.title.clone();
        let description = todo.description.clone();
        let is_done = todo.is_done;
        let updated_at = format_datetime(&now());

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let rows = tx
                    .execute(
                        schema::UPDATE_TODO,
                        params![id, title, description, is_done, updated_at],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                let updated = select_live_todo(&tx, id).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(updated)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY_TYPE, id.to_string()))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let deleted_at = format_datetime(&now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::SOFT_DELETE_TODO, params![id, deleted_at])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY_TYPE, id.to_string()))
    }

    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }
}
