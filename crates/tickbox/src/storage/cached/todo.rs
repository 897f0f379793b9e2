//! Cached todo repository decorator.
//!
//! Wraps a `TodoRepository` implementation with cache-aside pattern.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use tickbox_core::cache::{deserialize_todo, serialize_todo, todo_key, Cache};
use tickbox_core::storage::{Result, TodoRepository};
use tickbox_core::todo::{NewTodo, Todo};

/// Cached todo repository decorator.
///
/// Implements the cache-aside pattern:
/// - **Reads**: `find_by_id` checks the cache first, on miss fetches from the
///   repository and populates the cache
/// - **Writes**: Persist to repository, invalidate cache
///
/// Cache failures are logged and absorbed; callers only ever see repository
/// errors.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedTodoRepository<R, C>
where
    R: TodoRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedTodoRepository<R, C>
where
    R: TodoRepository,
    C: Cache,
{
    /// Creates a new cached todo repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for cached todos
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    async fn invalidate(&self, id: i64) {
        let cache_key = todo_key(id);
        match self.cache.delete(&cache_key).await {
            Ok(()) => tracing::debug!(todo_id = id, "Invalidated todo cache"),
            Err(err) => {
                tracing::warn!(todo_id = id, error = %err, "Failed to invalidate todo cache")
            }
        }
    }
}

#[async_trait]
impl<R, C> TodoRepository for CachedTodoRepository<R, C>
where
    R: TodoRepository + 'static,
    C: Cache + 'static,
{
    async fn save(&self, todo: NewTodo) -> Result<Todo> {
        self.repository.save(todo).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Todo> {
        let cache_key = todo_key(id);

        // Check cache first
        match self.cache.get(&cache_key).await {
            Ok(Some(bytes)) => match deserialize_todo(&bytes) {
                Ok(todo) => {
                    tracing::trace!(todo_id = id, "Cache hit for todo");
                    return Ok(todo);
                }
                // Deserialization failed - treat as cache miss
                Err(err) => {
                    tracing::warn!(todo_id = id, error = %err, "Cache todo deserialization failed")
                }
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(todo_id = id, error = %err, "Cache read failed for todo"),
        }

        // Cache miss - fetch from repository
        tracing::trace!(todo_id = id, "Cache miss for todo");
        let todo = self.repository.find_by_id(id).await?;

        match serialize_todo(&todo) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(&cache_key, &bytes, Some(self.ttl)).await {
                    tracing::warn!(todo_id = id, error = %err, "Failed to cache todo");
                }
            }
            Err(err) => tracing::warn!(todo_id = id, error = %err, "Failed to serialize todo"),
        }

        Ok(todo)
    }

    async fn find_all(&self) -> Result<Vec<Todo>> {
        self.repository.find_all().await
    }

    async fn update(&self, todo: &Todo) -> Result<Todo> {
        // 1. Persist to storage
        let updated = self.repository.update(todo).await?;

        // 2. Invalidate cache (will be repopulated on next read)
        self.invalidate(todo.id).await;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        // 1. Persist deletion to storage
        self.repository.delete(id).await?;

        // 2. Invalidate cache
        self.invalidate(id).await;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    use tickbox_core::cache::{CacheError, Result as CacheResult, DEFAULT_TODO_TTL};
    use tickbox_core::storage::RepositoryError;

    use crate::storage::inmemory::InMemoryRepository;

    // Repository that counts calls into the wrapped in-memory store
    struct CountingRepository {
        inner: InMemoryRepository,
        find_calls: AtomicUsize,
        update_calls: AtomicUsize,
    }

    impl CountingRepository {
        fn new() -> Self {
            Self {
                inner: InMemoryRepository::new(),
                find_calls: AtomicUsize::new(0),
                update_calls: AtomicUsize::new(0),
            }
        }

        fn find_calls(&self) -> usize {
            self.find_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TodoRepository for CountingRepository {
        async fn save(&self, todo: NewTodo) -> Result<Todo> {
            self.inner.save(todo).await
        }

        async fn find_by_id(&self, id: i64) -> Result<Todo> {
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id).await
        }

        async fn find_all(&self) -> Result<Vec<Todo>> {
            self.inner.find_all().await
        }

        async fn update(&self, todo: &Todo) -> Result<Todo> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.update(todo).await
        }

        async fn delete(&self, id: i64) -> Result<()> {
            self.inner.delete(id).await
        }
    }

    // Mock cache; `failing` makes every operation return an error
    struct MockCache {
        store: RwLock<HashMap<String, Vec<u8>>>,
        failing: bool,
        set_calls: AtomicUsize,
    }

    impl MockCache {
        fn new() -> Self {
            Self {
                store: RwLock::new(HashMap::new()),
                failing: false,
                set_calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                failing: true,
                ..Self::new()
            }
        }

        fn check(&self) -> CacheResult<()> {
            if self.failing {
                Err(CacheError::ConnectionFailed("cache unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            self.check()?;
            Ok(self.store.read().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
            self.set_calls.fetch_add(1, Ordering::SeqCst);
            self.check()?;
            self.store
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            self.check()?;
            self.store.write().await.remove(key);
            Ok(())
        }
    }

    type TestRepository = CachedTodoRepository<CountingRepository, MockCache>;

    fn cached_with(cache: MockCache) -> (TestRepository, Arc<CountingRepository>, Arc<MockCache>) {
        let repo = Arc::new(CountingRepository::new());
        let cache = Arc::new(cache);
        let cached = CachedTodoRepository::new(repo.clone(), cache.clone(), DEFAULT_TODO_TTL);
        (cached, repo, cache)
    }

    #[tokio::test]
    async fn test_find_by_id_cache_miss_populates_cache() {
        let (cached, repo, cache) = cached_with(MockCache::new());
        let todo = cached.save(NewTodo::new("A", "B")).await.unwrap();

        let result = cached.find_by_id(todo.id).await.unwrap();

        assert_eq!(result, todo);
        assert_eq!(repo.find_calls(), 1);
        assert!(cache.store.read().await.contains_key(&todo_key(todo.id)));
    }

    #[tokio::test]
    async fn test_find_by_id_cache_hit_skips_repository() {
        let (cached, repo, _cache) = cached_with(MockCache::new());
        let todo = cached.save(NewTodo::new("A", "B")).await.unwrap();

        let first = cached.find_by_id(todo.id).await.unwrap();
        let second = cached.find_by_id(todo.id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.find_calls(), 1); // Still 1
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_falls_back_to_repository() {
        let (cached, repo, cache) = cached_with(MockCache::new());
        let todo = cached.save(NewTodo::new("A", "B")).await.unwrap();
        cache
            .set(&todo_key(todo.id), b"not json", None)
            .await
            .unwrap();

        let result = cached.find_by_id(todo.id).await.unwrap();

        assert_eq!(result, todo);
        assert_eq!(repo.find_calls(), 1);
        // The corrupt bytes are replaced by a fresh snapshot.
        let bytes = cache.store.read().await.get(&todo_key(todo.id)).cloned();
        assert_eq!(deserialize_todo(&bytes.unwrap()).unwrap(), todo);
    }

    #[tokio::test]
    async fn test_failing_cache_is_never_surfaced() {
        let (cached, repo, cache) = cached_with(MockCache::failing());
        let todo = cached.save(NewTodo::new("A", "B")).await.unwrap();

        assert_eq!(cached.find_by_id(todo.id).await.unwrap(), todo);
        assert_eq!(cached.find_by_id(todo.id).await.unwrap(), todo);
        assert_eq!(repo.find_calls(), 2);
        assert_eq!(cache.set_calls.load(Ordering::SeqCst), 2);

        let updated = cached.update(&todo.clone().with_done(true)).await.unwrap();
        assert!(updated.is_done);
        cached.delete(todo.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_by_id_not_found_is_not_cached() {
        let (cached, _repo, cache) = cached_with(MockCache::new());

        let result = cached.find_by_id(404).await;

        assert_eq!(result, Err(RepositoryError::todo_not_found(404)));
        assert!(cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_invalidates_stale_snapshot() {
        let (cached, _repo, cache) = cached_with(MockCache::new());
        let todo = cached.save(NewTodo::new("A", "B")).await.unwrap();

        // Warm the cache, then change the record
        cached.find_by_id(todo.id).await.unwrap();
        cached.update(&todo.clone().with_title("C")).await.unwrap();

        assert!(!cache.store.read().await.contains_key(&todo_key(todo.id)));
        assert_eq!(cached.find_by_id(todo.id).await.unwrap().title, "C");
    }

    #[tokio::test]
    async fn test_failed_update_leaves_cache_untouched() {
        let (cached, repo, cache) = cached_with(MockCache::new());
        let ghost = NewTodo::new("ghost", "never saved").into_todo(7, chrono::Utc::now());
        cache.set(&todo_key(7), b"sentinel", None).await.unwrap();

        let result = cached.update(&ghost).await;

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(repo.update_calls.load(Ordering::SeqCst), 1);
        assert!(cache.store.read().await.contains_key(&todo_key(7)));
    }

    #[tokio::test]
    async fn test_delete_invalidates_and_hides_record() {
        let (cached, _repo, cache) = cached_with(MockCache::new());
        let todo = cached.save(NewTodo::new("A", "B")).await.unwrap();
        cached.find_by_id(todo.id).await.unwrap();

        cached.delete(todo.id).await.unwrap();

        assert!(!cache.store.read().await.contains_key(&todo_key(todo.id)));
        assert!(cached.find_by_id(todo.id).await.unwrap_err().is_not_found());
        assert!(cached.delete(todo.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_cache_untouched() {
        let (cached, _repo, cache) = cached_with(MockCache::new());
        cache.set(&todo_key(9), b"sentinel", None).await.unwrap();

        assert!(cached.delete(9).await.is_err());
        assert!(cache.store.read().await.contains_key(&todo_key(9)));
    }

    // Repository whose reads and writes fail with a storage error
    struct BrokenRepository;

    fn storage_error() -> RepositoryError {
        RepositoryError::QueryFailed("database is locked".to_string())
    }

    #[async_trait]
    impl TodoRepository for BrokenRepository {
        async fn save(&self, _todo: NewTodo) -> Result<Todo> {
            Err(storage_error())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Todo> {
            Err(storage_error())
        }

        async fn find_all(&self) -> Result<Vec<Todo>> {
            Err(storage_error())
        }

        async fn update(&self, _todo: &Todo) -> Result<Todo> {
            Err(storage_error())
        }

        async fn delete(&self, _id: i64) -> Result<()> {
            Err(storage_error())
        }
    }

    fn broken_cached() -> (CachedTodoRepository<BrokenRepository, MockCache>, Arc<MockCache>) {
        let cache = Arc::new(MockCache::new());
        let cached =
            CachedTodoRepository::new(Arc::new(BrokenRepository), cache.clone(), DEFAULT_TODO_TTL);
        (cached, cache)
    }

    #[tokio::test]
    async fn test_find_by_id_storage_error_propagates_without_caching() {
        let (cached, cache) = broken_cached();

        let result = cached.find_by_id(3).await;

        assert_eq!(result, Err(storage_error()));
        assert_eq!(cache.set_calls.load(Ordering::SeqCst), 0);
        assert!(cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_storage_error_propagates_and_keeps_cache() {
        let (cached, cache) = broken_cached();
        let todo = NewTodo::new("A", "B").into_todo(3, chrono::Utc::now());
        cache.set(&todo_key(3), b"snapshot", None).await.unwrap();

        let result = cached.update(&todo.with_done(true)).await;

        assert_eq!(result, Err(storage_error()));
        assert_eq!(
            cache.store.read().await.get(&todo_key(3)),
            Some(&b"snapshot".to_vec())
        );
    }

    #[tokio::test]
    async fn test_delete_storage_error_propagates_and_keeps_cache() {
        let (cached, cache) = broken_cached();
        cache.set(&todo_key(3), b"snapshot", None).await.unwrap();

        let result = cached.delete(3).await;

        assert_eq!(result, Err(storage_error()));
        assert_eq!(
            cache.store.read().await.get(&todo_key(3)),
            Some(&b"snapshot".to_vec())
        );
    }

    #[tokio::test]
    async fn test_find_all_bypasses_cache() {
        let (cached, _repo, cache) = cached_with(MockCache::new());
        cached.save(NewTodo::new("A", "B")).await.unwrap();
        cached.save(NewTodo::new("C", "D")).await.unwrap();

        assert_eq!(cached.find_all().await.unwrap().len(), 2);
        assert!(cache.store.read().await.is_empty());
    }
}
