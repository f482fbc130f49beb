//! Shared fixtures for the ranking integration tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::{
    Comparison, Document, InMemoryStore, KeyedDocument, RankedStore, StoreError, StoreResult,
    USERS_COLLECTION,
};
use serde_json::{Value, json};

/// Store operations, as recorded by [`RecordingStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Count,
    TopN,
    Get,
    CountWhere,
    Fetch,
    Put,
    Patch,
}

/// Wraps an `InMemoryStore`, records every call and fails chosen operations
#[derive(Default)]
pub struct RecordingStore {
    pub inner: InMemoryStore,
    calls: Mutex<Vec<Op>>,
    failing: Mutex<HashSet<Op>>,
}

impl RecordingStore {
    pub fn new(inner: InMemoryStore) -> Arc<Self> {
        Arc::new(Self {
            inner,
            ..Default::default()
        })
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_of(&self, op: Op) -> usize {
        self.calls().iter().filter(|c| **c == op).count()
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, op: Op) -> StoreResult<()> {
        self.calls.lock().unwrap().push(op);
        if self.failing.lock().unwrap().contains(&op) {
            return Err(StoreError::Unavailable(format!("{:?} failed", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl RankedStore for RecordingStore {
    async fn count(&self, collection: &str) -> StoreResult<u64> {
        self.record(Op::Count)?;
        self.inner.count(collection).await
    }

    async fn top_n(
        &self,
        collection: &str,
        field: &str,
        n: usize,
    ) -> StoreResult<Vec<KeyedDocument>> {
        self.record(Op::TopN)?;
        self.inner.top_n(collection, field, n).await
    }

    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Document>> {
        self.record(Op::Get)?;
        self.inner.get(collection, key).await
    }

    async fn count_where(
        &self,
        collection: &str,
        field: &str,
        op: Comparison,
        value: f64,
    ) -> StoreResult<u64> {
        self.record(Op::CountWhere)?;
        self.inner.count_where(collection, field, op, value).await
    }

    async fn fetch(&self, collection: &str, n: usize) -> StoreResult<Vec<KeyedDocument>> {
        self.record(Op::Fetch)?;
        self.inner.fetch(collection, n).await
    }

    async fn put(&self, collection: &str, key: &str, data: Document) -> StoreResult<()> {
        self.record(Op::Put)?;
        self.inner.put(collection, key, data).await
    }

    async fn patch(&self, collection: &str, key: &str, data: Document) -> StoreResult<()> {
        self.record(Op::Patch)?;
        self.inner.patch(collection, key, data).await
    }
}

/// Store a score record for each `(user_id, score)` pair
pub async fn seed_scores(store: &InMemoryStore, scores: &[(&str, f64)]) {
    for (user_id, score) in scores {
        let Value::Object(doc) = json!({
            "nickname": user_id.to_uppercase(),
            "totalScore": score,
        }) else {
            unreachable!();
        };
        store
            .put(USERS_COLLECTION, user_id, doc)
            .await
            .expect("seeding the in-memory store cannot fail");
    }
}
