//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of the store trait
//! using `rusqlite` for synchronous operations and `tokio-rusqlite` for async wrapping.

mod conversions;
mod error;
mod schema;
mod store;

pub use store::SqliteStore;
