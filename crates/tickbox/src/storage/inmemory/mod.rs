//! In-memory storage backend for testing.
//!
//! Stores todos in a `BTreeMap` behind an `Arc<RwLock<_>>`. Useful for
//! tests and development scenarios where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use tickbox::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
