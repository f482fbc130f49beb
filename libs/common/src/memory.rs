//! In-memory document store
//!
//! Backs tests and local runs of the API service. Ordering and filtering
//! follow the same rules as the networked adapters.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::{Comparison, Document, merge_shallow, numeric_field, score_order};
use crate::error::{StoreError, StoreResult};
use crate::store::{KeyedDocument, RankedStore};

type Collections = HashMap<String, BTreeMap<String, Document>>;

/// In-memory `RankedStore`
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
    /// Sortable `(collection, field)` pairs; `None` means every field
    indexes: Option<Arc<HashSet<(String, String)>>>,
}

impl InMemoryStore {
    /// Create an empty store that can order by any field
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that only orders by the declared pairs
    pub fn with_indexes<I, C, F>(indexes: I) -> Self
    where
        I: IntoIterator<Item = (C, F)>,
        C: Into<String>,
        F: Into<String>,
    {
        let indexes = indexes
            .into_iter()
            .map(|(collection, field)| (collection.into(), field.into()))
            .collect();

        Self {
            collections: Arc::default(),
            indexes: Some(Arc::new(indexes)),
        }
    }

    fn is_indexed(&self, collection: &str, field: &str) -> bool {
        match &self.indexes {
            Some(indexes) => indexes.contains(&(collection.to_string(), field.to_string())),
            None => true,
        }
    }
}

#[async_trait]
impl RankedStore for InMemoryStore {
    async fn count(&self, collection: &str) -> StoreResult<u64> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, |c| c.len() as u64))
    }

    async fn top_n(
        &self,
        collection: &str,
        field: &str,
        n: usize,
    ) -> StoreResult<Vec<KeyedDocument>> {
        if !self.is_indexed(collection, field) {
            return Err(StoreError::missing_index(collection, field));
        }

        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut scored: Vec<(&String, &Document)> = documents
            .iter()
            .filter(|(_, doc)| numeric_field(doc, field).is_some())
            .collect();
        scored.sort_by(|a, b| score_order(field, (a.0.as_str(), a.1), (b.0.as_str(), b.1)));

        Ok(scored
            .into_iter()
            .take(n)
            .map(|(key, doc)| (key.clone(), doc.clone()))
            .collect())
    }

    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(key))
            .cloned())
    }

    async fn count_where(
        &self,
        collection: &str,
        field: &str,
        op: Comparison,
        value: f64,
    ) -> StoreResult<u64> {
        let collections = self.collections.read().await;
        let count = collections.get(collection).map_or(0, |documents| {
            documents
                .values()
                .filter_map(|doc| numeric_field(doc, field))
                .filter(|score| op.matches(*score, value))
                .count()
        });
        Ok(count as u64)
    }

    async fn fetch(&self, collection: &str, n: usize) -> StoreResult<Vec<KeyedDocument>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or_else(Vec::new, |documents| {
            documents
                .iter()
                .take(n)
                .map(|(key, doc)| (key.clone(), doc.clone()))
                .collect()
        }))
    }

    async fn put(&self, collection: &str, key: &str, data: Document) -> StoreResult<()> {
        debug!("put {}/{}", collection, key);
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), data);
        Ok(())
    }

    async fn patch(&self, collection: &str, key: &str, data: Document) -> StoreResult<()> {
        debug!("patch {}/{}", collection, key);
        let mut collections = self.collections.write().await;
        let Some(existing) = collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(key))
        else {
            return Err(StoreError::not_found(collection, key));
        };

        *existing = merge_shallow(std::mem::take(existing), &data);
        Ok(())
    }
}
