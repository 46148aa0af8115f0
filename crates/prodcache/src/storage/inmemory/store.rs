//! In-memory store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use prodcache_core::product::{Product, ProductFields, ProductId};
use prodcache_core::storage::{ProductStore, RepositoryError, Result};

const ENTITY: &str = "Product";

#[derive(Debug)]
struct Tables {
    products: BTreeMap<ProductId, Product>,
    next_id: ProductId,
}

impl Tables {
    fn name_taken(&self, name: &str, except: Option<ProductId>) -> bool {
        self.products
            .values()
            .any(|p| p.name == name && Some(p.id) != except)
    }
}

/// In-memory storage backend for testing.
///
/// Enforces the same constraints as the SQL schema: IDs are assigned from an
/// auto-incrementing counter that is never reused, and product names are
/// unique. Data is lost when the store is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                products: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn create_product(&self, fields: &ProductFields) -> Result<Product> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(&fields.name, None) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: ENTITY,
                id: fields.name.clone(),
            });
        }

        let id = tables.next_id;
        tables.next_id += 1;

        let product = Product::from_fields(id, fields.clone());
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.get(&id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().cloned().collect())
    }

    async fn update_product(&self, id: ProductId, fields: &ProductFields) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.products.contains_key(&id) {
            return Err(RepositoryError::NotFound {
                entity_type: ENTITY,
                id: id.to_string(),
            });
        }
        if tables.name_taken(&fields.name, Some(id)) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: ENTITY,
                id: fields.name.clone(),
            });
        }

        tables
            .products
            .insert(id, Product::from_fields(id, fields.clone()));
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.products.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: ENTITY,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
