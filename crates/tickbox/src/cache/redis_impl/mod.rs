//! Redis cache backend implementation.
//!
//! Provides a shared cache for multi-instance deployments, using a
//! connection manager that reconnects transparently.

mod cache;
mod error;

pub use cache::RedisCache;
