use serde::{Deserialize, Serialize};

/// Store-assigned product identifier. Zero is never assigned.
pub type ProductId = u64;

/// A product row as held by the durable store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Decimal price kept as text (e.g. `"9.99"`).
    pub price: String,
}

impl Product {
    /// Builds a product from an assigned id and its mutable fields.
    pub fn from_fields(id: ProductId, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
        }
    }

    /// Returns the mutable fields of this product.
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            price: self.price.clone(),
        }
    }
}

/// The mutable scalar fields of a product, used for create and update payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub price: String,
}

impl ProductFields {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    /// Replaces the price.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }
}
