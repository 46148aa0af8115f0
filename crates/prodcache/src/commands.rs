//! CLI commands driving the cached product repository.

use clap::Subcommand;
use serde::Serialize;
use serde_json::{json, Value};

use prodcache_core::cache::{product_lock_key, Cache};
use prodcache_core::product::{Product, ProductFields, ProductId};
use prodcache_core::storage::{ProductRepository, ProductStore, RepositoryError};

use crate::error::{CommandError, Result};
use crate::mock_data::demo_products;
use crate::storage::cached::{CachedProductRepository, LeaseGuard};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
    },
    /// Fetch a product by id
    Get { id: ProductId },
    /// List every known product
    List,
    /// Replace a product's name and price
    Update {
        id: ProductId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
    },
    /// Delete a product
    Delete { id: ProductId },
    /// Create the demo catalogue, skipping names that already exist
    Seed,
    /// Walk through create, cached read, update and a lock conflict
    Demo,
}

/// Runs one command and returns its JSON output.
pub async fn run<S, C>(repo: &CachedProductRepository<S, C>, command: Command) -> Result<Value>
where
    S: ProductStore + 'static,
    C: Cache + 'static,
{
    let output = match command {
        Command::Create { name, price } => {
            let product = repo
                .create_product(&ProductFields::new(name, price))
                .await?;
            serde_json::to_value(product)?
        }
        Command::Get { id } => serde_json::to_value(repo.get_product(id).await?)?,
        Command::List => {
            let mut products = repo.get_all_products().await?;
            products.sort_by_key(|p| p.id);
            serde_json::to_value(products)?
        }
        Command::Update { id, name, price } => {
            let fields = ProductFields::new(name, price);
            repo.update_product(id, &fields).await?;
            serde_json::to_value(Product::from_fields(id, fields))?
        }
        Command::Delete { id } => {
            repo.delete_product(id).await?;
            json!({ "deleted": id })
        }
        Command::Seed => serde_json::to_value(seed(repo).await?)?,
        Command::Demo => serde_json::to_value(demo(repo).await?)?,
    };

    Ok(output)
}

/// Outcome of [`seed`].
#[derive(Debug, Default, Serialize)]
pub struct SeedReport {
    pub created: Vec<Product>,
    /// Names that already existed in the store.
    pub skipped: Vec<String>,
}

/// Creates the demo catalogue.
pub async fn seed<S, C>(repo: &CachedProductRepository<S, C>) -> Result<SeedReport>
where
    S: ProductStore + 'static,
    C: Cache + 'static,
{
    let mut report = SeedReport::default();

    for fields in demo_products() {
        match repo.create_product(&fields).await {
            Ok(product) => report.created.push(product),
            Err(RepositoryError::AlreadyExists { .. }) => {
                tracing::debug!(name = %fields.name, "Product already exists, skipping");
                report.skipped.push(fields.name);
            }
            Err(err) => return Err(err.into()),
        }
    }

    tracing::info!(
        created = report.created.len(),
        skipped = report.skipped.len(),
        "Seeded demo products"
    );
    Ok(report)
}

/// One step of the [`demo`] walkthrough.
#[derive(Debug, Serialize)]
pub struct DemoStep {
    pub step: &'static str,
    pub outcome: Value,
}

impl DemoStep {
    fn new(step: &'static str, outcome: impl Serialize) -> Result<Self> {
        Ok(Self {
            step,
            outcome: serde_json::to_value(outcome)?,
        })
    }
}

/// Runs the Widget walkthrough: create, cached read, update, read back, then
/// an update that collides with another writer's lock and a retry.
///
/// The other writer is simulated by taking the product's lease directly, so
/// the conflict is deterministic.
pub async fn demo<S, C>(repo: &CachedProductRepository<S, C>) -> Result<Vec<DemoStep>>
where
    S: ProductStore + 'static,
    C: Cache + 'static,
{
    let widget = ProductFields::new("Widget", "9.99");
    let mut steps = Vec::new();

    let product = match repo.create_product(&widget).await {
        Ok(product) => product,
        Err(RepositoryError::AlreadyExists { .. }) => {
            // Left over from an earlier run against a persistent store
            let existing = repo
                .get_all_products()
                .await?
                .into_iter()
                .find(|p| p.name == widget.name)
                .ok_or_else(|| RepositoryError::NotFound {
                    entity_type: "Product",
                    id: widget.name.clone(),
                })?;
            if existing.fields() != widget {
                repo.update_product(existing.id, &widget).await?;
            }
            Product::from_fields(existing.id, widget.clone())
        }
        Err(err) => return Err(err.into()),
    };
    let id = product.id;
    steps.push(DemoStep::new("create", &product)?);

    let hits = repo.metrics().hits;
    let cached = repo.get_product(id).await?;
    steps.push(DemoStep::new(
        "read",
        json!({ "product": cached, "cache_hit": repo.metrics().hits > hits }),
    )?);

    let repriced = widget.clone().with_price("12.99");
    repo.update_product(id, &repriced).await?;
    steps.push(DemoStep::new("update", Product::from_fields(id, repriced))?);

    let reread = repo.get_product(id).await?;
    if reread.price != "12.99" {
        return Err(CommandError::DemoMismatch {
            step: "read_after_update",
            expected: "price 12.99",
            actual: reread.price,
        });
    }
    steps.push(DemoStep::new("read_after_update", &reread)?);

    // Another writer holds the lock while this update arrives
    let other_writer = LeaseGuard::acquire(repo.cache(), product_lock_key(id), repo.lock_ttl())
        .await?
        .ok_or_else(|| RepositoryError::Conflict {
            entity_type: "Product",
            id: id.to_string(),
        })?;
    let contended = repo
        .update_product(id, &widget.clone().with_price("13.99"))
        .await;
    other_writer.release().await?;

    match contended {
        Err(err @ RepositoryError::Conflict { .. }) => {
            steps.push(DemoStep::new(
                "concurrent_update",
                json!({ "result": "conflict", "error": err.to_string() }),
            )?);
        }
        other => {
            return Err(CommandError::DemoMismatch {
                step: "concurrent_update",
                expected: "a lock conflict",
                actual: format!("{other:?}"),
            });
        }
    }

    let retried = widget.with_price("13.99");
    repo.update_product(id, &retried).await?;
    steps.push(DemoStep::new("retry_update", Product::from_fields(id, retried))?);

    steps.push(DemoStep::new("final_read", repo.get_product(id).await?)?);
    Ok(steps)
}
