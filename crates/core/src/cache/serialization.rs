//! Pure functions for serializing/deserializing todos to/from cache bytes.
//!
//! Values are stored as JSON so cache contents stay human-readable in
//! `redis-cli`.

use crate::todo::Todo;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a todo snapshot to JSON bytes.
pub fn serialize_todo(todo: &Todo) -> Result<Vec<u8>> {
    serde_json::to_vec(todo).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a todo snapshot.
pub fn deserialize_todo(bytes: &[u8]) -> Result<Todo> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
