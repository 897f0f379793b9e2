mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{todo_key, DEFAULT_TODO_TTL, TODO_KEY_PREFIX};
pub use serialization::{deserialize_todo, serialize_todo, SerializationError};
pub use traits::Cache;
