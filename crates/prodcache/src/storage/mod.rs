//! Storage backend implementations.
//!
//! This module provides concrete implementations of the [`ProductStore`]
//! trait defined in `prodcache_core::storage`, plus the cached repository
//! that layers a [`Cache`] over any of them. The store implementation is
//! selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): In-process store backed by a `BTreeMap`
//! - `sqlite`: SQLite store using `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with the in-memory store (default):
//! ```bash
//! cargo build -p prodcache
//! ```
//!
//! Build with SQLite and Redis:
//! ```bash
//! cargo build -p prodcache --no-default-features --features sqlite,redis
//! ```
//!
//! [`ProductStore`]: prodcache_core::storage::ProductStore
//! [`Cache`]: prodcache_core::cache::Cache

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p prodcache --no-default-features --features sqlite,memory"
);

pub mod cached;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
