//! Cached repository decorator.
//!
//! This module layers a [`Cache`] over a [`ProductStore`] and exposes the
//! result as a [`ProductRepository`]:
//!
//! - **Reads**: Check the cache first, on miss fetch from the store and repopulate
//! - **Writes**: Persist to the store, then overwrite the cache (write-through)
//! - **Updates/deletes**: Serialized per product with an expiring cache lease
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = Arc::new(SqliteStore::new("prodcache.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//!
//! let repo = CachedProductRepository::new(store, cache, Duration::from_secs(5));
//! ```
//!
//! [`Cache`]: prodcache_core::cache::Cache
//! [`ProductStore`]: prodcache_core::storage::ProductStore
//! [`ProductRepository`]: prodcache_core::storage::ProductRepository

mod lease;
mod product;

#[cfg(test)]
mod mocks;

pub use lease::LeaseGuard;
pub use product::CachedProductRepository;
