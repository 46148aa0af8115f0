//! Pure conversions between products and their cache hash records.
//!
//! A record is a flat field map (`id`, `name`, `price`). It is always written
//! whole, so a reader either sees a complete record or none at all.

use std::collections::HashMap;

use crate::product::Product;

use super::keys::parse_product_id;

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_PRICE: &str = "price";

/// Converts a product into the field/value pairs of its cache record.
pub fn product_to_record(product: &Product) -> Vec<(String, String)> {
    vec![
        (FIELD_ID.to_string(), product.id.to_string()),
        (FIELD_NAME.to_string(), product.name.clone()),
        (FIELD_PRICE.to_string(), product.price.clone()),
    ]
}

/// Reads a product back from a cache record.
///
/// Returns `None` when the record should be treated as a miss: empty map
/// (what most backends return for an unknown key), missing or zero `id`, or
/// any missing field.
pub fn record_to_product(record: &HashMap<String, String>) -> Option<Product> {
    let id = record.get(FIELD_ID).and_then(|v| parse_product_id(v))?;
    let name = record.get(FIELD_NAME)?;
    let price = record.get(FIELD_PRICE)?;

    Some(Product {
        id,
        name: name.clone(),
        price: price.clone(),
    })
}
