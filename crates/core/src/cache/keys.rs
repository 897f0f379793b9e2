use std::time::Duration;

/// Prefix shared by every todo cache key.
pub const TODO_KEY_PREFIX: &str = "todo:";

/// Default time-to-live for cached todos (10 minutes).
pub const DEFAULT_TODO_TTL: Duration = Duration::from_secs(600);

/// Returns the cache key for a single todo.
pub fn todo_key(id: i64) -> String {
    format!("{TODO_KEY_PREFIX}{id}")
}
