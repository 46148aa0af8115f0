//! Test doubles for the cached repository.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, RwLock};

use prodcache_core::cache::{Cache, CacheError, Result as CacheResult};
use prodcache_core::product::{Product, ProductFields, ProductId};
use prodcache_core::storage::{ProductStore, RepositoryError, Result};

// ============================================================================
// MockCache
// ============================================================================

/// Cache double with separate failure switches for reads, writes, deletes and
/// lock acquisition. Lock keys never expire.
#[derive(Default)]
pub struct MockCache {
    hashes: RwLock<HashMap<String, HashMap<String, String>>>,
    sets: RwLock<HashMap<String, BTreeSet<String>>>,
    strings: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
    fail_locks: AtomicBool,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_locks(&self, fail: bool) {
        self.fail_locks.store(fail, Ordering::SeqCst);
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.hashes.read().await.contains_key(key)
            || self.sets.read().await.contains_key(key)
            || self.strings.read().await.contains_key(key)
    }

    pub async fn hash(&self, key: &str) -> HashMap<String, String> {
        self.hashes.read().await.get(key).cloned().unwrap_or_default()
    }

    pub async fn members(&self, key: &str) -> BTreeSet<String> {
        self.sets.read().await.get(key).cloned().unwrap_or_default()
    }

    /// Overwrites a hash wholesale, bypassing the failure switches.
    pub async fn put_hash(&self, key: &str, fields: &[(&str, &str)]) {
        let hash = fields
            .iter()
            .map(|(f, v)| (f.to_string(), v.to_string()))
            .collect();
        self.hashes.write().await.insert(key.to_string(), hash);
    }

    /// Adds a set member, bypassing the failure switches.
    pub async fn put_member(&self, key: &str, member: &str) {
        self.sets
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
    }

    fn check(flag: &AtomicBool, op: &str) -> CacheResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed(format!("{op}: cache unreachable")));
        }
        Ok(())
    }
}

#[async_trait]
impl Cache for MockCache {
    async fn hash_set(&self, key: &str, fields: &[(String, String)]) -> CacheResult<()> {
        Self::check(&self.fail_writes, "HSET")?;
        let mut hashes = self.hashes.write().await;
        let hash = hashes.entry(key.to_string()).or_default();
        for (field, value) in fields {
            hash.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    async fn hash_get_all(&self, key: &str) -> CacheResult<HashMap<String, String>> {
        Self::check(&self.fail_reads, "HGETALL")?;
        Ok(self.hash(key).await)
    }

    async fn set_add(&self, key: &str, member: &str) -> CacheResult<()> {
        Self::check(&self.fail_writes, "SADD")?;
        self.put_member(key, member).await;
        Ok(())
    }

    async fn set_remove(&self, key: &str, member: &str) -> CacheResult<()> {
        Self::check(&self.fail_writes, "SREM")?;
        if let Some(set) = self.sets.write().await.get_mut(key) {
            set.remove(member);
        }
        Ok(())
    }

    async fn set_members(&self, key: &str) -> CacheResult<Vec<String>> {
        Self::check(&self.fail_reads, "SMEMBERS")?;
        Ok(self.members(key).await.into_iter().collect())
    }

    async fn set_if_absent(&self, key: &str, value: &str, _ttl: Duration) -> CacheResult<bool> {
        Self::check(&self.fail_locks, "SET NX")?;
        let mut strings = self.strings.write().await;
        if strings.contains_key(key) {
            return Ok(false);
        }
        strings.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        Self::check(&self.fail_deletes, "DEL")?;
        self.hashes.write().await.remove(key);
        self.sets.write().await.remove(key);
        self.strings.write().await.remove(key);
        Ok(())
    }
}

// ============================================================================
// MockProductStore
// ============================================================================

/// Pauses `update_product` until the test lets it continue.
#[derive(Clone, Default)]
pub struct UpdateGate {
    /// Notified once an update has entered the store.
    pub entered: Arc<Notify>,
    /// Notify to let a paused update finish.
    pub proceed: Arc<Notify>,
}

/// Store double that counts calls, enforces unique names and can be made to
/// fail or stall.
#[derive(Default)]
pub struct MockProductStore {
    products: RwLock<BTreeMap<ProductId, Product>>,
    pub create_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    fail_updates: AtomicBool,
    fail_lists: AtomicBool,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    update_gate: Option<UpdateGate>,
    update_delay: Option<Duration>,
}

impl MockProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_update_gate(mut self, gate: UpdateGate) -> Self {
        self.update_gate = Some(gate);
        self
    }

    pub fn with_update_delay(mut self, delay: Duration) -> Self {
        self.update_delay = Some(delay);
        self
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Inserts a row directly, bypassing call counters.
    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }

    /// Reads a row directly, bypassing call counters.
    pub async fn row(&self, id: ProductId) -> Option<Product> {
        self.products.read().await.get(&id).cloned()
    }

    /// Removes a row directly, bypassing call counters.
    pub async fn remove(&self, id: ProductId) {
        self.products.write().await.remove(&id);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductStore for MockProductStore {
    async fn create_product(&self, fields: &ProductFields) -> Result<Product> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut products = self.products.write().await;
        if products.values().any(|p| p.name == fields.name) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Product",
                id: fields.name.clone(),
            });
        }
        let id = products.keys().next_back().copied().unwrap_or(0) + 1;
        let product = Product::from_fields(id, fields.clone());
        products.insert(id, product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.row(id).await)
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionFailed("store unreachable".into()));
        }
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn update_product(&self, id: ProductId, fields: &ProductFields) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.update_gate {
            gate.entered.notify_one();
            gate.proceed.notified().await;
        }
        if let Some(delay) = self.update_delay {
            tokio::time::sleep(delay).await;
        }
        // Give concurrent callers a chance to interleave
        tokio::task::yield_now().await;

        let result = if self.fail_updates.load(Ordering::SeqCst) {
            Err(RepositoryError::QueryFailed("disk I/O error".into()))
        } else {
            let mut products = self.products.write().await;
            let name_taken = products
                .values()
                .any(|p| p.name == fields.name && p.id != id);
            match products.get_mut(&id) {
                Some(_) if name_taken => Err(RepositoryError::AlreadyExists {
                    entity_type: "Product",
                    id: fields.name.clone(),
                }),
                Some(row) => {
                    row.name = fields.name.clone();
                    row.price = fields.price.clone();
                    Ok(())
                }
                None => Err(RepositoryError::NotFound {
                    entity_type: "Product",
                    id: id.to_string(),
                }),
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        match self.products.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound {
                entity_type: "Product",
                id: id.to_string(),
            }),
        }
    }
}
