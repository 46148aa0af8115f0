//! SQLite row conversion functions.

use prodcache_core::product::Product;
use rusqlite::Row;

/// Convert a SQLite row to a Product.
///
/// Expected columns: id, name, price
pub fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let price: String = row.get(2)?;

    Ok(Product {
        id: parse_id(id)?,
        name,
        price,
    })
}

/// Converts a SQLite rowid into a product ID.
pub fn parse_id(id: i64) -> rusqlite::Result<u64> {
    u64::try_from(id).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, id))
}

/// Converts a product ID into a SQLite integer parameter.
///
/// IDs that do not fit an `i64` cannot exist in the table and map to `-1`,
/// which matches no row.
pub fn id_param(id: u64) -> i64 {
    i64::try_from(id).unwrap_or(-1)
}
