//! Cached product repository.
//!
//! Combines a durable `ProductStore` with a `Cache` using write-through on
//! create and update, cache-aside on reads, and a per-product lease around
//! update and delete.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use prodcache_core::cache::{
    parse_product_id, product_key, product_lock_key, product_to_record, record_to_product, Cache,
    CacheMetrics, CacheMetricsSnapshot, ALL_PRODUCT_IDS_KEY,
};
use prodcache_core::product::{validate_fields, Product, ProductFields, ProductId};
use prodcache_core::storage::{ProductRepository, ProductStore, RepositoryError, Result};

use super::lease::LeaseGuard;

const ENTITY: &str = "Product";

/// Cached product repository.
///
/// - **Reads**: check the product's cache record first; on a miss read the
///   store and repopulate the record.
/// - **Writes**: write the store first, then overwrite the cache record and
///   index. Cache writes are best-effort and never fail the call.
/// - **Updates/deletes**: serialized per product by a lease key; a held lease
///   fails the call with `Conflict` immediately.
///
/// # Type Parameters
///
/// * `S` - The durable store, always the source of truth
/// * `C` - The cache implementation
pub struct CachedProductRepository<S, C>
where
    S: ProductStore,
    C: Cache + 'static,
{
    store: Arc<S>,
    cache: Arc<C>,
    lock_ttl: Duration,
    metrics: Arc<CacheMetrics>,
}

impl<S, C> CachedProductRepository<S, C>
where
    S: ProductStore,
    C: Cache + 'static,
{
    /// Creates a new cached product repository.
    ///
    /// # Arguments
    ///
    /// * `store` - The durable store
    /// * `cache` - The cache implementation
    /// * `lock_ttl` - Lifetime of the per-product update lease
    pub fn new(store: Arc<S>, cache: Arc<C>, lock_ttl: Duration) -> Self {
        Self {
            store,
            cache,
            lock_ttl,
            metrics: Arc::new(CacheMetrics::new()),
        }
    }

    /// Returns a point-in-time copy of the cache counters.
    pub fn metrics(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// The cache this repository writes to.
    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    pub fn lock_ttl(&self) -> Duration {
        self.lock_ttl
    }

    /// Reads the cache record for `id`. Any failure counts as a miss.
    async fn read_cached(&self, id: ProductId) -> Option<Product> {
        let record = match self.cache.hash_get_all(&product_key(id)).await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(product_id = id, error = %err, "Cache read failed, falling back to store");
                self.metrics.record_degraded();
                return None;
            }
        };

        match record_to_product(&record) {
            Some(product) if product.id == id => Some(product),
            Some(product) => {
                tracing::warn!(
                    product_id = id,
                    cached_id = product.id,
                    "Cache record holds a different id"
                );
                None
            }
            None if record.is_empty() => None,
            None => {
                tracing::warn!(product_id = id, "Incomplete cache record");
                None
            }
        }
    }

    /// Writes the full cache record and indexes the id. Best-effort.
    async fn populate(&self, product: &Product) {
        let key = product_key(product.id);
        if let Err(err) = self
            .cache
            .hash_set(&key, &product_to_record(product))
            .await
        {
            tracing::warn!(product_id = product.id, error = %err, "Failed to cache product");
            self.metrics.record_degraded();
        }

        if let Err(err) = self
            .cache
            .set_add(ALL_PRODUCT_IDS_KEY, &product.id.to_string())
            .await
        {
            tracing::warn!(product_id = product.id, error = %err, "Failed to index product id");
            self.metrics.record_degraded();
        }
    }

    /// Removes the cache record and index entry for `id`. Best-effort.
    async fn evict(&self, id: ProductId) {
        if let Err(err) = self.cache.delete(&product_key(id)).await {
            tracing::warn!(product_id = id, error = %err, "Failed to evict cached product");
            self.metrics.record_degraded();
        }

        if let Err(err) = self
            .cache
            .set_remove(ALL_PRODUCT_IDS_KEY, &id.to_string())
            .await
        {
            tracing::warn!(product_id = id, error = %err, "Failed to unindex product id");
            self.metrics.record_degraded();
        }
    }

    async fn acquire_lease(&self, id: ProductId) -> Result<LeaseGuard<C>> {
        let conflict = || RepositoryError::Conflict {
            entity_type: ENTITY,
            id: id.to_string(),
        };

        match LeaseGuard::acquire(&self.cache, product_lock_key(id), self.lock_ttl).await {
            Ok(Some(lease)) => Ok(lease),
            Ok(None) => {
                tracing::debug!(product_id = id, "Product is locked by another writer");
                self.metrics.record_conflict();
                Err(conflict())
            }
            Err(err) => {
                // Without the lease the write cannot be serialized
                tracing::warn!(product_id = id, error = %err, "Failed to acquire product lock");
                self.metrics.record_degraded();
                self.metrics.record_conflict();
                Err(conflict())
            }
        }
    }

    async fn release_lease(&self, id: ProductId, lease: LeaseGuard<C>) {
        if lease.overran() {
            tracing::warn!(
                product_id = id,
                lock = lease.key(),
                elapsed_ms = lease.elapsed().as_millis() as u64,
                ttl_ms = self.lock_ttl.as_millis() as u64,
                "Lock held past its TTL, another writer may have run concurrently"
            );
            self.metrics.record_lease_overrun();
        }

        if let Err(err) = lease.release().await {
            tracing::warn!(product_id = id, error = %err, "Failed to release product lock");
            self.metrics.record_degraded();
        }
    }
}

#[async_trait]
impl<S, C> ProductRepository for CachedProductRepository<S, C>
where
    S: ProductStore + 'static,
    C: Cache + 'static,
{
    async fn get_all_products(&self) -> Result<Vec<Product>> {
        let members = match self.cache.set_members(ALL_PRODUCT_IDS_KEY).await {
            Ok(members) => members,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read product index");
                self.metrics.record_degraded();
                Vec::new()
            }
        };

        if members.is_empty() {
            // Cold cache: scan the store and warm every record
            let products = self.store.list_products().await?;
            for product in &products {
                self.populate(product).await;
            }
            tracing::debug!(count = products.len(), "Warmed product cache from store");
            return Ok(products);
        }

        let mut products = Vec::with_capacity(members.len());
        for member in members {
            let Some(id) = parse_product_id(&member) else {
                tracing::warn!(member = %member, "Skipping malformed product index entry");
                continue;
            };
            match self.get_product(id).await {
                Ok(product) => products.push(product),
                Err(err) => {
                    tracing::trace!(product_id = id, error = %err, "Skipping indexed product");
                }
            }
        }

        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product> {
        if let Some(product) = self.read_cached(id).await {
            tracing::trace!(product_id = id, "Cache hit for product");
            self.metrics.record_hit();
            return Ok(product);
        }

        tracing::trace!(product_id = id, "Cache miss for product");
        self.metrics.record_miss();

        let product = self
            .store
            .get_product(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: ENTITY,
                id: id.to_string(),
            })?;

        self.populate(&product).await;
        Ok(product)
    }

    async fn create_product(&self, fields: &ProductFields) -> Result<Product> {
        validate_fields(fields)?;

        let product = self.store.create_product(fields).await?;
        self.populate(&product).await;

        tracing::debug!(product_id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    async fn update_product(&self, id: ProductId, fields: &ProductFields) -> Result<()> {
        validate_fields(fields)?;

        let lease = self.acquire_lease(id).await?;

        let result = self.store.update_product(id, fields).await;
        if result.is_ok() {
            self.populate(&Product::from_fields(id, fields.clone()))
                .await;
        }

        self.release_lease(id, lease).await;
        result?;

        tracing::debug!(product_id = id, "Product updated");
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let lease = self.acquire_lease(id).await?;

        let result = self.store.delete_product(id).await;
        if result.is_ok() {
            self.evict(id).await;
        }

        self.release_lease(id, lease).await;
        result?;

        tracing::debug!(product_id = id, "Product deleted");
        Ok(())
    }
}
