//! Custom error types for the common library
//!
//! This module defines the storage error taxonomy shared by every
//! `RankedStore` adapter and by the services built on top of them.

use redis::RedisError;
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for document store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// An ordered query needs a sort index that does not exist
    #[error("Missing sort index on {collection}.{field}")]
    MissingIndex { collection: String, field: String },

    /// A partial update targeted a document that does not exist
    #[error("Document {collection}/{key} not found")]
    NotFound { collection: String, key: String },

    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error returned by the Redis client
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    /// A stored document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error occurred during schema migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Store configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Build a `NotFound` error for the given document
    pub fn not_found(collection: &str, key: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            key: key.to_string(),
        }
    }

    /// Build a `MissingIndex` error for the given sort field
    pub fn missing_index(collection: &str, field: &str) -> Self {
        StoreError::MissingIndex {
            collection: collection.to_string(),
            field: field.to_string(),
        }
    }

    /// Whether this error reports an absent document
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::missing_index("users", "totalScore");
        assert_eq!(err.to_string(), "Missing sort index on users.totalScore");

        let err = StoreError::not_found("userProfiles", "u1");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Document userProfiles/u1 not found");
    }
}
