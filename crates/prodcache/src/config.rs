use std::{env, time::Duration};

const DEFAULT_LOCK_TTL_MS: u64 = 5_000;
const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Product update lock TTL in milliseconds (default: 5,000)
    pub lock_ttl_ms: u64,
    /// Maximum number of entries in the memory cache (default: 10,000)
    /// Note: Only used when the `memory` feature is enabled.
    #[allow(dead_code)]
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "prodcache.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LOCK_TTL_MS` - Update lock TTL in milliseconds (default: 5,000)
    /// - `CACHE_MAX_ENTRIES` - Maximum memory cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "prodcache.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `LOG_FORMAT` - `json` for JSON logs, anything else for text
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Zero or unparseable numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            lock_ttl_ms: lookup("LOCK_TTL_MS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&ms: &u64| ms > 0)
                .unwrap_or(DEFAULT_LOCK_TTL_MS),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(DEFAULT_CACHE_MAX_ENTRIES),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "prodcache.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            log_json: lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        }
    }

    /// Get the lock TTL as a Duration.
    pub fn lock_ttl(&self) -> Duration {
        Duration::from_millis(self.lock_ttl_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
