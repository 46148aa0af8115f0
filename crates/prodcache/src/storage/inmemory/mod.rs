//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of the store trait
//! that keeps all rows in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. This is
//! useful for testing and development scenarios where persistence is not
//! required.
//!
//! # Example
//!
//! ```rust,ignore
//! use prodcache::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // Use store for testing...
//! ```

mod store;

pub use store::InMemoryStore;
