//! Redis cache backend implementation.
//!
//! Provides a distributed cache using Redis for multi-instance deployments.
//! Every instance sees the same product records, index set and update locks.

mod cache;
mod error;

pub use cache::RedisCache;
