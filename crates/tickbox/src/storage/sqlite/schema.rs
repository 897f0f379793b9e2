//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK (length(title) > 0),
    description TEXT NOT NULL DEFAULT '',
    is_done INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_todos_deleted_at ON todos(deleted_at);
CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at);
"#;

pub const INSERT_TODO: &str = r#"
INSERT INTO todos (title, description, is_done, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?4)
"#;

pub const SELECT_TODO_BY_ID: &str = r#"
SELECT id, title, description, is_done, created_at, updated_at, deleted_at
FROM todos
WHERE id = ?1 AND deleted_at IS NULL
"#;

pub const SELECT_ALL_TODOS: &str = r#"
SELECT id, title, description, is_done, created_at, updated_at, deleted_at
FROM todos
WHERE deleted_at IS NULL
ORDER BY created_at DESC, id DESC
"#;

pub const UPDATE_TODO: &str = r#"
UPDATE todos
SET title = ?2, description = ?3, is_done = ?4, updated_at = ?5
WHERE id = ?1 AND deleted_at IS NULL
"#;

pub const SOFT_DELETE_TODO: &str = r#"
UPDATE todos
SET deleted_at = ?2, updated_at = ?2
WHERE id = ?1 AND deleted_at IS NULL
"#;

pub const PING: &str = "SELECT 1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(CREATE_TABLES).unwrap();
        // Idempotent: running twice must not fail.
        conn.execute_batch(CREATE_TABLES).unwrap();
    }

    #[test]
    fn test_reads_exclude_soft_deleted_rows() {
        assert!(SELECT_TODO_BY_ID.contains("deleted_at IS NULL"));
        assert!(SELECT_ALL_TODOS.contains("deleted_at IS NULL"));
        assert!(UPDATE_TODO.contains("deleted_at IS NULL"));
        assert!(SOFT_DELETE_TODO.contains("deleted_at IS NULL"));
    }

    #[test]
    fn test_list_is_newest_first() {
        assert!(SELECT_ALL_TODOS.contains("ORDER BY created_at DESC, id DESC"));
    }
}
