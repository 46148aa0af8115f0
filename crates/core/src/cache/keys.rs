use crate::product::ProductId;

/// Key of the set holding every product ID that has been cached at least once.
pub const ALL_PRODUCT_IDS_KEY: &str = "products:all_ids";

/// Returns the cache key for a product's hash record.
pub fn product_key(id: ProductId) -> String {
    format!("product:{}", id)
}

/// Returns the key of the advisory update lock for a product.
pub fn product_lock_key(id: ProductId) -> String {
    format!("lock:product:{}", id)
}

/// Parses a member of [`ALL_PRODUCT_IDS_KEY`] back into a product ID.
///
/// Returns `None` for anything that is not a positive integer.
///
/// # Examples
///
/// ```
/// use prodcache_core::cache::parse_product_id;
///
/// assert_eq!(parse_product_id("42"), Some(42));
/// assert_eq!(parse_product_id("0"), None);
/// assert_eq!(parse_product_id("abc"), None);
/// ```
pub fn parse_product_id(member: &str) -> Option<ProductId> {
    member.trim().parse::<ProductId>().ok().filter(|id| *id != 0)
}
