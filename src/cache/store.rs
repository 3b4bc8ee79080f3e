//! Bounded TTL cache shared across analyses.
//!
//! Wraps a `moka` cache configured with both a time-to-live and a max entry count, so entries
//! leave either by age or by size pressure. Writes are last-writer-wins.

use moka::sync::Cache;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// Process-wide performance cache with TTL and size-based eviction.
pub struct CacheStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    entries: Cache<K, V>,
    ttl: Duration,
    capacity: u64,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache with `capacity` max entries and `ttl` per entry.
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            ttl,
            capacity,
        }
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key)
    }

    #[inline]
    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    #[inline]
    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the approximate number of live entries.
    ///
    /// Call [`run_pending_tasks`](Self::run_pending_tasks) first for an exact count.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl<K, V> std::fmt::Debug for CacheStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("entries", &self.entries.entry_count())
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Shared handle to a [`CacheStore`].
pub struct CacheHandle<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<CacheStore<K, V>>,
}

impl<K, V> Clone for CacheHandle<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> CacheHandle<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(CacheStore::new(capacity, ttl)),
        }
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key)
    }

    #[inline]
    pub fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value)
    }

    #[inline]
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn clear(&self) {
        self.inner.clear();
    }

    #[inline]
    pub fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks();
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl()
    }

    /// Returns the number of strong references to the underlying cache.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<K, V> std::fmt::Debug for CacheHandle<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheHandle")
            .field("inner", &self.inner)
            .field("strong_count", &self.strong_count())
            .finish()
    }
}
