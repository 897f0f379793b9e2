//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It wires a storage backend, optionally wrapped in the
//! caching decorator, into a `TodoService`, and supports different backend
//! combinations via feature flags.

use std::sync::Arc;
use std::time::Duration;

use tickbox_core::cache::Cache;
use tickbox_core::storage::TodoRepository;

use crate::config::Config;
use crate::service::TodoService;
use crate::storage::CachedTodoRepository;

/// Shared application state.
///
/// This is cloned for each request handler. Every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Todo operations over the (possibly cached) repository.
    pub todos: TodoService,
    /// Cache backend, kept for health probing. `None` when caching is disabled.
    pub cache: Option<Arc<dyn Cache>>,
    /// Deadline applied to every request.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState from a repository and an optional cache.
    ///
    /// With a cache the repository is wrapped in `CachedTodoRepository`;
    /// without one the service talks to the repository directly.
    fn build<R, C>(repository: Arc<R>, cache: Option<Arc<C>>, config: &Config) -> Self
    where
        R: TodoRepository + 'static,
        C: Cache + 'static,
    {
        let (repository, cache): (Arc<dyn TodoRepository>, Option<Arc<dyn Cache>>) = match cache {
            Some(cache) => {
                tracing::info!(ttl = ?config.cache_ttl(), "Read-through cache enabled");
                let cached: Arc<dyn TodoRepository> = Arc::new(CachedTodoRepository::new(
                    repository,
                    cache.clone(),
                    config.cache_ttl(),
                ));
                let cache: Arc<dyn Cache> = cache;
                (cached, Some(cache))
            }
            None => {
                tracing::info!("Read-through cache disabled");
                let repository: Arc<dyn TodoRepository> = repository;
                (repository, None)
            }
        };

        Self {
            todos: TodoService::new(repository),
            cache,
            request_timeout: config.request_timeout(),
        }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let memory_cache = config
                .cache_enabled
                .then(|| Arc::new(MemoryCache::new(config.cache_max_entries)));

            Ok(Self::build(sqlite_repo, memory_cache, config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::redis_impl::RedisCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let redis_cache = if config.cache_enabled {
                Some(Arc::new(RedisCache::new(&config.redis_url()).await?))
            } else {
                None
            };

            Ok(Self::build(sqlite_repo, redis_cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for testing without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let memory_cache = config
                .cache_enabled
                .then(|| Arc::new(MemoryCache::new(config.cache_max_entries)));

            Ok(Self::build(inmemory_repo, memory_cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::redis_impl::RedisCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let redis_cache = if config.cache_enabled {
                Some(Arc::new(RedisCache::new(&config.redis_url()).await?))
            } else {
                None
            };

            Ok(Self::build(inmemory_repo, redis_cache, config))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::storage::inmemory::InMemoryRepository;

    impl AppState {
        /// Test state with an explicit configuration and no cache.
        pub fn uncached(config: &Config) -> Self {
            Self::build::<_, MemoryCache>(Arc::new(InMemoryRepository::new()), None, config)
        }

        /// Test state over a caller-provided repository and cache.
        pub fn with_backends<R, C>(repository: Arc<R>, cache: Option<Arc<C>>, config: &Config) -> Self
        where
            R: TodoRepository + 'static,
            C: Cache + 'static,
        {
            Self::build(repository, cache, config)
        }
    }

    impl Default for AppState {
        /// Creates an AppState with in-memory storage and cache for testing.
        ///
        /// This is only available in test builds and provides a simple way
        /// to create an AppState without external dependencies.
        fn default() -> Self {
            let config = Config::default();
            Self::build(
                Arc::new(InMemoryRepository::new()),
                Some(Arc::new(MemoryCache::new(config.cache_max_entries))),
                &config,
            )
        }
    }
}
