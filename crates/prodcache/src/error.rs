use prodcache_core::cache::CacheError;
use prodcache_core::storage::RepositoryError;
use thiserror::Error;

/// Errors returned by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("Demo step `{step}` expected {expected}, got {actual}")]
    DemoMismatch {
        step: &'static str,
        expected: &'static str,
        actual: String,
    },
}

impl CommandError {
    /// Process exit code for this error.
    ///
    /// Lock conflicts get their own code so scripts can retry them. Store
    /// failures exit with 2, anything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Repository(RepositoryError::NotFound { .. }) => 3,
            Self::Repository(RepositoryError::AlreadyExists { .. }) => 4,
            Self::Repository(RepositoryError::Conflict { .. }) => 5,
            Self::Repository(RepositoryError::InvalidData(_)) => 6,
            Self::Repository(err) if err.is_store_failure() => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CommandError>;
