//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache with TTL support using
//! tokio synchronization primitives and LRU eviction policy.
//!
//! This implementation mirrors the Redis data model the cached repository
//! relies on:
//! - Hashes, sets and plain string keys share one keyspace
//! - Using a key with the wrong operation family fails with `WrongType`
//! - Every operation runs under a single write lock, so a multi-field hash
//!   write is never observed half-applied

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use prodcache_core::cache::{Cache, CacheError, Result};

/// A typed value stored under a cache key.
#[derive(Debug, Clone)]
enum Value {
    Str(String),
    Hash(HashMap<String, String>),
    Set(HashSet<String>),
}

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Value, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

type Store = LruCache<String, CacheEntry>;

/// Returns the live entry at `key`, evicting it first if it has expired.
fn live_entry<'a>(store: &'a mut Store, key: &str) -> Option<&'a mut CacheEntry> {
    if store.peek(key).is_some_and(CacheEntry::is_expired) {
        store.pop(key);
        return None;
    }
    store.get_mut(key)
}

fn wrong_type(key: &str) -> CacheError {
    CacheError::WrongType(key.to_string())
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Supports TTL with lazy expiration (entries are dropped on access).
/// Uses LRU eviction to limit memory usage when max_entries is reached.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<Store>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of keys before LRU eviction kicks in.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let mut store = self.store.write().await;
        match live_entry(&mut store, key) {
            Some(CacheEntry {
                value: Value::Hash(hash),
                ..
            }) => {
                for (field, value) in fields {
                    hash.insert(field.clone(), value.clone());
                }
            }
            Some(_) => return Err(wrong_type(key)),
            None => {
                let hash = fields.iter().cloned().collect();
                store.put(key.to_string(), CacheEntry::new(Value::Hash(hash), None));
            }
        }

        Ok(())
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>> {
        let mut store = self.store.write().await;
        match live_entry(&mut store, key) {
            Some(CacheEntry {
                value: Value::Hash(hash),
                ..
            }) => Ok(hash.clone()),
            Some(_) => Err(wrong_type(key)),
            None => Ok(HashMap::new()),
        }
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<()> {
        let mut store = self.store.write().await;
        match live_entry(&mut store, key) {
            Some(CacheEntry {
                value: Value::Set(set),
                ..
            }) => {
                set.insert(member.to_string());
            }
            Some(_) => return Err(wrong_type(key)),
            None => {
                let set = HashSet::from([member.to_string()]);
                store.put(key.to_string(), CacheEntry::new(Value::Set(set), None));
            }
        }

        Ok(())
    }

    async fn set_remove(&self, key: &str, member: &str) -> Result<()> {
        let mut store = self.store.write().await;
        let now_empty = match live_entry(&mut store, key) {
            Some(CacheEntry {
                value: Value::Set(set),
                ..
            }) => {
                set.remove(member);
                set.is_empty()
            }
            Some(_) => return Err(wrong_type(key)),
            None => false,
        };

        // Redis drops a set once its last member is removed
        if now_empty {
            store.pop(key);
        }

        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>> {
        let mut store = self.store.write().await;
        match live_entry(&mut store, key) {
            Some(CacheEntry {
                value: Value::Set(set),
                ..
            }) => Ok(set.iter().cloned().collect()),
            Some(_) => Err(wrong_type(key)),
            None => Ok(Vec::new()),
        }
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let mut store = self.store.write().await;
        if live_entry(&mut store, key).is_some() {
            return Ok(false);
        }

        let entry = CacheEntry::new(Value::Str(value.to_string()), Some(ttl));
        store.put(key.to_string(), entry);
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }
}
