//! Advisory per-key leases backed by an expiring cache key.
//!
//! A lease is a `SET NX` with a TTL. It is not a mutex: if the holder outlives
//! the TTL, a second holder can acquire the same key while the first is still
//! working. Holders can check [`LeaseGuard::overran`] to detect that case.

use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use prodcache_core::cache::{Cache, Result};

/// A held lease. Release it with [`LeaseGuard::release`].
///
/// Dropping a guard without releasing it (cancelled future, panic) spawns a
/// best-effort release on the current Tokio runtime; if there is none the key
/// is left to expire.
pub struct LeaseGuard<C>
where
    C: Cache + 'static,
{
    cache: Arc<C>,
    key: String,
    token: String,
    ttl: Duration,
    acquired_at: Instant,
    released: bool,
}

impl<C> LeaseGuard<C>
where
    C: Cache + 'static,
{
    /// Tries to take the lease at `key`.
    ///
    /// Returns `Ok(None)` if someone else holds it.
    pub async fn acquire(cache: &Arc<C>, key: String, ttl: Duration) -> Result<Option<Self>> {
        let token = Uuid::new_v4().to_string();
        if !cache.set_if_absent(&key, &token, ttl).await? {
            return Ok(None);
        }

        tracing::trace!(lease = %key, %token, "Lease acquired");
        Ok(Some(Self {
            cache: Arc::clone(cache),
            key,
            token,
            ttl,
            acquired_at: Instant::now(),
            released: false,
        }))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Time since the lease was acquired.
    pub fn elapsed(&self) -> Duration {
        self.acquired_at.elapsed()
    }

    /// Returns true if the lease has been held longer than its TTL, meaning
    /// another holder may already have acquired the same key.
    pub fn overran(&self) -> bool {
        self.elapsed() > self.ttl
    }

    /// Deletes the lease key.
    pub async fn release(mut self) -> Result<()> {
        self.released = true;
        self.cache.delete(&self.key).await?;
        tracing::trace!(lease = %self.key, token = %self.token, "Lease released");
        Ok(())
    }
}

impl<C> Drop for LeaseGuard<C>
where
    C: Cache + 'static,
{
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let key = std::mem::take(&mut self.key);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let cache = Arc::clone(&self.cache);
                handle.spawn(async move {
                    if let Err(err) = cache.delete(&key).await {
                        tracing::warn!(lease = %key, error = %err, "Failed to release dropped lease");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(lease = %key, "Lease dropped outside a runtime, left to expire");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::cached::mocks::MockCache;

    const TTL: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_acquire_is_exclusive() {
        let cache = Arc::new(MockCache::new());

        let first = LeaseGuard::acquire(&cache, "lock:product:1".into(), TTL)
            .await
            .unwrap();
        assert!(first.is_some());

        let second = LeaseGuard::acquire(&cache, "lock:product:1".into(), TTL)
            .await
            .unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_contend() {
        let cache = Arc::new(MockCache::new());

        let a = LeaseGuard::acquire(&cache, "lock:product:1".into(), TTL)
            .await
            .unwrap();
        let b = LeaseGuard::acquire(&cache, "lock:product:2".into(), TTL)
            .await
            .unwrap();

        assert!(a.is_some());
        assert!(b.is_some());
    }

    #[tokio::test]
    async fn test_release_frees_key() {
        let cache = Arc::new(MockCache::new());

        let lease = LeaseGuard::acquire(&cache, "lock:product:1".into(), TTL)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(lease.key(), "lock:product:1");
        lease.release().await.unwrap();

        assert!(!cache.contains("lock:product:1").await);
        assert!(LeaseGuard::acquire(&cache, "lock:product:1".into(), TTL)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_dropped_lease_is_released_in_background() {
        let cache = Arc::new(MockCache::new());

        let lease = LeaseGuard::acquire(&cache, "lock:product:1".into(), TTL)
            .await
            .unwrap()
            .unwrap();
        drop(lease);

        for _ in 0..10 {
            if !cache.contains("lock:product:1").await {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(!cache.contains("lock:product:1").await);
    }

    #[tokio::test]
    async fn test_overran() {
        let cache = Arc::new(MockCache::new());

        let lease = LeaseGuard::acquire(&cache, "lock:product:1".into(), Duration::from_millis(10))
            .await
            .unwrap()
            .unwrap();
        assert!(!lease.overran());

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(lease.overran());
    }
}
