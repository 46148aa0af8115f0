use thiserror::Error;

use crate::product::ProductError;

/// Errors that can occur during repository operations.
///
/// `ConnectionFailed`, `QueryFailed` and `Serialization` together form the
/// generic store-failure family. Cache failures never appear here; they are
/// downgraded to logs and metrics by the cached repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} {id} is being updated, try again")]
    Conflict {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Returns true for the generic store-failure family.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::QueryFailed(_) | Self::Serialization(_)
        )
    }
}

impl From<ProductError> for RepositoryError {
    fn from(err: ProductError) -> Self {
        Self::InvalidData(err.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
