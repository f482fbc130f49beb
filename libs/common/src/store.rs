//! Ranked document store abstraction
//!
//! Every backend (in-memory, PostgreSQL, Redis) implements [`RankedStore`];
//! the services only ever see this trait.

use async_trait::async_trait;

use crate::document::{Comparison, Document};
use crate::error::StoreResult;

/// Collection holding one score record per user
pub const USERS_COLLECTION: &str = "users";

/// Collection holding one profile document per user
pub const PROFILES_COLLECTION: &str = "userProfiles";

/// A document paired with its key
pub type KeyedDocument = (String, Document);

/// Generic document collection with count, ordered and point reads.
///
/// Ordered reads sort by the requested field descending and break ties by
/// key ascending. Documents without a numeric value for the field are left
/// out of `top_n` and `count_where`.
#[async_trait]
pub trait RankedStore: Send + Sync {
    /// Total number of documents in `collection`
    async fn count(&self, collection: &str) -> StoreResult<u64>;

    /// Up to `n` documents ordered by `field` descending.
    ///
    /// Fails with `StoreError::MissingIndex` when the backend cannot order
    /// by `field`.
    async fn top_n(&self, collection: &str, field: &str, n: usize)
    -> StoreResult<Vec<KeyedDocument>>;

    /// Point lookup; `None` when the key does not exist
    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Document>>;

    /// Number of documents whose numeric `field` satisfies `op value`
    async fn count_where(
        &self,
        collection: &str,
        field: &str,
        op: Comparison,
        value: f64,
    ) -> StoreResult<u64>;

    /// Up to `n` documents in no particular order
    async fn fetch(&self, collection: &str, n: usize) -> StoreResult<Vec<KeyedDocument>>;

    /// Create or fully replace a document
    async fn put(&self, collection: &str, key: &str, data: Document) -> StoreResult<()>;

    /// Shallow-merge `data` into an existing document.
    ///
    /// Fails with `StoreError::NotFound` when the key does not exist.
    async fn patch(&self, collection: &str, key: &str, data: Document) -> StoreResult<()>;
}
