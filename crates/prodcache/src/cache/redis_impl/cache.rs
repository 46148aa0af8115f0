//! Redis cache implementation.
//!
//! Each trait method maps onto a single Redis command, so every operation is
//! atomic on the server:
//!
//! | Method          | Command             |
//! |-----------------|---------------------|
//! | `hash_set`      | `HSET key f v ...`  |
//! | `hash_get_all`  | `HGETALL key`       |
//! | `set_add`       | `SADD key m`        |
//! | `set_remove`    | `SREM key m`        |
//! | `set_members`   | `SMEMBERS key`      |
//! | `set_if_absent` | `SET key v NX PX ms`|
//! | `delete`        | `DEL key`           |

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use prodcache_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        conn.hset_multiple::<_, _, _, ()>(key, fields)
            .await
            .map_err(map_redis_error)
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>> {
        let mut conn = self.conn.clone();
        conn.hgetall(key).await.map_err(map_redis_error)
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.sadd::<_, _, ()>(key, member)
            .await
            .map_err(map_redis_error)
    }

    async fn set_remove(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.srem::<_, _, ()>(key, member)
            .await
            .map_err(map_redis_error)
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        conn.smembers(key).await.map_err(map_redis_error)
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.conn.clone();
        let millis = (ttl.as_millis() as u64).max(1);

        // SET NX replies OK when stored and nil when the key already exists
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("PX")
            .arg(millis)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        Ok(reply.is_some())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_redis_error)
    }
}
