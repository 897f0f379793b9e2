//! Cache backend implementations.
//!
//! This module provides concrete implementations of the `Cache` trait
//! defined in `tickbox_core::cache`. The implementations are selected
//! at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): In-process LRU cache using tokio synchronization primitives
//! - `redis`: Redis cache using the redis crate
//!
//! These features are mutually exclusive - only one cache backend can be
//! enabled at a time. The memory backend is always compiled for tests.

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one cache backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No cache backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p tickbox --features memory"
);

#[cfg(any(test, feature = "memory"))]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;
