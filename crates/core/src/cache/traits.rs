use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Cache operations needed by the cached product repository.
///
/// The shape follows Redis: hashes, sets and plain string keys share one
/// keyspace, and using a key with the wrong operation family is an error.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Sets every given field of the hash at `key` in one operation.
    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<()>;

    /// Returns all fields of the hash at `key`, or an empty map if absent.
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>>;

    /// Adds `member` to the set at `key`.
    async fn set_add(&self, key: &str, member: &str) -> Result<()>;

    /// Removes `member` from the set at `key`.
    async fn set_remove(&self, key: &str, member: &str) -> Result<()>;

    /// Returns all members of the set at `key`, or an empty list if absent.
    async fn set_members(&self, key: &str) -> Result<Vec<String>>;

    /// Atomically stores `value` at `key` with a TTL if the key does not exist.
    ///
    /// Returns `true` if the value was stored.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool>;

    /// Deletes `key` regardless of its type.
    async fn delete(&self, key: &str) -> Result<()>;
}
