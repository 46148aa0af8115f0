use super::error::ProductError;
use super::types::ProductFields;

/// Column width of `products.name`.
pub const MAX_NAME_LEN: usize = 100;
/// Column width of `products.price`.
pub const MAX_PRICE_LEN: usize = 100;

/// Validates product fields before create or update.
pub fn validate_fields(fields: &ProductFields) -> Result<(), ProductError> {
    if fields.name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    if fields.name.chars().count() > MAX_NAME_LEN {
        return Err(ProductError::NameTooLong);
    }
    if fields.price.trim().is_empty() {
        return Err(ProductError::EmptyPrice);
    }
    if fields.price.chars().count() > MAX_PRICE_LEN {
        return Err(ProductError::PriceTooLong);
    }
    Ok(())
}
