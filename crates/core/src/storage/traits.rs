use async_trait::async_trait;

use crate::product::{Product, ProductFields, ProductId};

use super::Result;

/// Durable store for products. Always the source of truth.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a product and returns it with its assigned ID.
    ///
    /// Uniqueness violations are reported as `RepositoryError::AlreadyExists`.
    async fn create_product(&self, fields: &ProductFields) -> Result<Product>;

    /// Gets a product by its ID.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>>;

    /// Returns every product in the store.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Updates the mutable fields of an existing product.
    ///
    /// Returns `RepositoryError::NotFound` if no row matches `id`.
    async fn update_product(&self, id: ProductId, fields: &ProductFields) -> Result<()>;

    /// Deletes a product by its ID.
    async fn delete_product(&self, id: ProductId) -> Result<()>;
}

/// Repository surface exposed to callers.
///
/// Callers never learn whether a value came from the cache or the store.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns every known product. Order is unspecified.
    async fn get_all_products(&self) -> Result<Vec<Product>>;

    /// Gets a product by its ID, or `RepositoryError::NotFound`.
    async fn get_product(&self, id: ProductId) -> Result<Product>;

    /// Creates a product and returns it with its assigned ID.
    async fn create_product(&self, fields: &ProductFields) -> Result<Product>;

    /// Updates a product. Fails fast with `RepositoryError::Conflict` when
    /// another update of the same product is in flight.
    async fn update_product(&self, id: ProductId, fields: &ProductFields) -> Result<()>;

    /// Deletes a product.
    async fn delete_product(&self, id: ProductId) -> Result<()>;
}
