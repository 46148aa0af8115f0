//! In-memory cache backend implementation.
//!
//! Provides a thread-safe in-process cache with hashes, sets, TTL keys and
//! LRU eviction for single-instance deployments.

mod cache;

pub use cache::MemoryCache;
