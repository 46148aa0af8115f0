use prodcache_core::product::ProductFields;

/// Demo catalogue used by the `seed` command.
pub fn demo_products() -> Vec<ProductFields> {
    [
        ("MacBook Pro 16\"", "2499.00"),
        ("iPhone 15 Pro", "1199.00"),
        ("Sony WH-1000XM5", "399.00"),
        ("iPad Air", "799.00"),
        ("AirPods Pro", "249.00"),
        ("Samsung Galaxy S24", "999.00"),
        ("Dell XPS 15", "1799.00"),
        ("Bose QC45", "329.00"),
        ("Apple Watch Ultra", "799.00"),
        ("Nintendo Switch OLED", "349.00"),
    ]
    .into_iter()
    .map(|(name, price)| ProductFields::new(name, price))
    .collect()
}
