mod error;
mod keys;
mod metrics;
mod record;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{parse_product_id, product_key, product_lock_key, ALL_PRODUCT_IDS_KEY};
pub use metrics::{CacheMetrics, CacheMetricsSnapshot};
pub use record::{product_to_record, record_to_product, FIELD_ID, FIELD_NAME, FIELD_PRICE};
pub use traits::Cache;
