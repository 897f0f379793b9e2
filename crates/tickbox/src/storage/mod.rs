//! Storage backend implementations.
//!
//! This module provides concrete implementations of `TodoRepository`
//! defined in `tickbox_core::storage`, plus the caching decorator that wraps
//! them. The backends are selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//! - `inmemory`: process-local storage, nothing survives a restart
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p tickbox
//! ```
//!
//! Build with in-memory storage:
//! ```bash
//! cargo build -p tickbox --no-default-features --features inmemory,memory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'sqlite' or 'inmemory' feature. \
    Example: cargo build -p tickbox --features sqlite"
);

pub mod cached;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

pub use cached::CachedTodoRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;
