//! SQLite store implementation.
//!
//! Implements the `ProductStore` trait from `prodcache_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use prodcache_core::product::{Product, ProductFields, ProductId};
use prodcache_core::storage::{ProductStore, RepositoryError, Result};

use super::conversions::{id_param, parse_id, row_to_product};
use super::error::map_tokio_rusqlite_error;
use super::schema;

const ENTITY: &str = "Product";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based product store.
///
/// IDs come from `INTEGER PRIMARY KEY AUTOINCREMENT`, so they are never
/// reused after a delete.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new store with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn create_product(&self, fields: &ProductFields) -> Result<Product> {
        let name = fields.name.clone();
        let price = fields.price.clone();
        let owned = fields.clone();

        let rowid = self
            .conn
            .call(move |conn| {
                conn.execute(schema::INSERT_PRODUCT, rusqlite::params![name, price])
                    .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, owned.name.clone()))?;

        let id = parse_id(rowid).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        Ok(Product::from_fields(id, owned))
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PRODUCT_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id_param(id)], row_to_product) {
                    Ok(product) => Ok(Some(product)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, id.to_string()))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_PRODUCTS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_product).map_err(wrap_err)?;

                let mut products = Vec::new();
                for row_result in rows {
                    products.push(row_result.map_err(wrap_err)?);
                }
                Ok(products)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, "*"))
    }

    async fn update_product(&self, id: ProductId, fields: &ProductFields) -> Result<()> {
        let name = fields.name.clone();
        let price = fields.price.clone();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_PRODUCT,
                        rusqlite::params![id_param(id), name, price],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| match map_tokio_rusqlite_error(e, ENTITY, id.to_string()) {
                // Name collisions are reported by name, as on create
                RepositoryError::AlreadyExists { entity_type, .. } => {
                    RepositoryError::AlreadyExists {
                        entity_type,
                        id: fields.name.clone(),
                    }
                }
                other => other,
            })
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_PRODUCT, [id_param(id)])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, id.to_string()))
    }
}
