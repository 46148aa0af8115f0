//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite store,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Products table
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    price TEXT NOT NULL
);
"#;

pub const INSERT_PRODUCT: &str = r#"
INSERT INTO products (name, price)
VALUES (?1, ?2)
"#;

pub const SELECT_PRODUCT_BY_ID: &str = r#"
SELECT id, name, price
FROM products
WHERE id = ?1
"#;

pub const SELECT_ALL_PRODUCTS: &str = r#"
SELECT id, name, price
FROM products
ORDER BY id ASC
"#;

pub const UPDATE_PRODUCT: &str = r#"
UPDATE products
SET name = ?2, price = ?3
WHERE id = ?1
"#;

pub const DELETE_PRODUCT: &str = r#"
DELETE FROM products
WHERE id = ?1
"#;
