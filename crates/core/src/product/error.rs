use thiserror::Error;

/// Errors that can occur when validating product fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product name cannot be empty")]
    EmptyName,
    #[error("Product name too long (max 100 characters)")]
    NameTooLong,
    #[error("Product price cannot be empty")]
    EmptyPrice,
    #[error("Product price too long (max 100 characters)")]
    PriceTooLong,
}
