mod error;
mod operations;
mod types;

pub use error::ProductError;
pub use operations::{validate_fields, MAX_NAME_LEN, MAX_PRICE_LEN};
pub use types::{Product, ProductFields, ProductId};
