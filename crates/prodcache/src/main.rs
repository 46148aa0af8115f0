mod cache;
mod commands;
mod config;
mod error;
mod mock_data;
mod storage;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{commands::Command, config::Config, storage::cached::CachedProductRepository};

/// prodcache - Cache-consistent product repository over a durable store
#[derive(Parser, Debug)]
#[command(name = "prodcache")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print cache metrics after the command
    #[arg(long)]
    stats: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env();

    init_tracing(&config);

    let store = Arc::new(open_store(&config).await?);
    let cache = Arc::new(open_cache(&config).await?);
    let repo = CachedProductRepository::new(store, cache, config.lock_ttl());

    tracing::info!(lock_ttl_ms = config.lock_ttl_ms, "Product repository ready");

    let code = match commands::run(&repo, cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    };

    if cli.stats {
        println!("{}", serde_json::to_string_pretty(&repo.metrics())?);
    }

    Ok(code)
}

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays valid JSON.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "prodcache=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

// ============================================================================
// Backend factories
// ============================================================================

#[cfg(feature = "inmemory")]
async fn open_store(_config: &Config) -> Result<storage::InMemoryStore> {
    tracing::info!("Using in-memory store");
    Ok(storage::InMemoryStore::new())
}

#[cfg(feature = "sqlite")]
async fn open_store(config: &Config) -> Result<storage::SqliteStore> {
    tracing::info!(path = %config.sqlite_path, "Opening SQLite store");
    storage::SqliteStore::new(&config.sqlite_path)
        .await
        .with_context(|| format!("failed to open SQLite database at {}", config.sqlite_path))
}

#[cfg(feature = "memory")]
async fn open_cache(config: &Config) -> Result<cache::MemoryCache> {
    tracing::info!(max_entries = config.cache_max_entries, "Using in-memory cache");
    Ok(cache::MemoryCache::new(config.cache_max_entries))
}

#[cfg(feature = "redis")]
async fn open_cache(config: &Config) -> Result<cache::RedisCache> {
    tracing::info!(url = %config.redis_url, "Connecting to Redis");
    cache::RedisCache::new(&config.redis_url)
        .await
        .with_context(|| format!("failed to connect to Redis at {}", config.redis_url))
}
