//! Cached repository decorators.
//!
//! This module provides a decorator that wraps `TodoRepository` with caching
//! behavior. The decorator implements the cache-aside pattern:
//!
//! - **Reads**: Check cache first, on miss fetch from repository and populate cache
//! - **Writes**: Persist to repository, then invalidate the cached snapshot
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let repo = Arc::new(SqliteRepository::new("tickbox.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//!
//! let cached_repo = CachedTodoRepository::new(repo, cache, DEFAULT_TODO_TTL);
//! ```

mod todo;

pub use todo::CachedTodoRepository;
