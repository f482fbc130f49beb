//! Redis document store
//!
//! Documents are stored as hashes holding one JSON value per top-level field,
//! so a patch only rewrites the fields it carries. Declared numeric fields are
//! mirrored into sorted sets so that ordered reads and range counts stay
//! server-side.
//!
//! Key layout for a collection `c`:
//! - `c:doc:{key}`: hash of field name to JSON value
//! - `c:keys`: set of document keys
//! - `c:idx:{field}`: sorted set of keys scored by the negated field value

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use redis::{AsyncCommands, Client, Script};
use tracing::{debug, info};

use crate::document::{Comparison, Document, numeric_field};
use crate::error::{StoreError, StoreResult};
use crate::store::{KeyedDocument, RankedStore};

/// Configuration for Redis connection
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
}

impl RedisConfig {
    /// Create a new RedisConfig from environment variables
    ///
    /// # Environment Variables
    /// - `REDIS_URL`: Redis connection URL (default: "redis://localhost:6379")
    pub fn from_env() -> StoreResult<Self> {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

        Ok(RedisConfig { url })
    }
}

/// Redis connection pool
#[derive(Clone)]
pub struct RedisPool {
    client: Client,
}

impl RedisPool {
    /// Initialize a new Redis connection pool
    pub async fn new(config: &RedisConfig) -> StoreResult<Self> {
        let client = Client::open(config.url.clone())?;
        info!("Redis client initialized with URL: {}", config.url);
        Ok(RedisPool { client })
    }

    /// Get a connection from the pool
    async fn get_connection(&self) -> StoreResult<redis::aio::MultiplexedConnection> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    /// Check if Redis is reachable
    pub async fn health_check(&self) -> StoreResult<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

/// Applies a patch in one server-side step.
///
/// KEYS: document hash, key set, then each sorted set to refresh.
/// ARGV: document key, number of field/value pairs, the pairs, then one
/// negated score per sorted set (empty string drops the member).
const PATCH_SCRIPT: &str = r#"
if redis.call('SISMEMBER', KEYS[2], ARGV[1]) == 0 then
  return 0
end
local pair_args = tonumber(ARGV[2]) * 2
if pair_args > 0 then
  redis.call('HSET', KEYS[1], unpack(ARGV, 3, 2 + pair_args))
end
for i = 3, #KEYS do
  local score = ARGV[i + pair_args]
  if score == '' then
    redis.call('ZREM', KEYS[i], ARGV[1])
  else
    redis.call('ZADD', KEYS[i], score, ARGV[1])
  end
end
return 1
"#;

fn patch_script() -> &'static Script {
    static SCRIPT: OnceLock<Script> = OnceLock::new();
    SCRIPT.get_or_init(|| Script::new(PATCH_SCRIPT))
}

/// `RankedStore` over Redis hashes, sets and sorted sets
#[derive(Clone)]
pub struct RedisDocumentStore {
    pool: RedisPool,
    indexes: Arc<HashSet<(String, String)>>,
}

impl RedisDocumentStore {
    /// Create a store that maintains a sorted set for each declared pair
    pub fn new<I, C, F>(pool: RedisPool, indexes: I) -> Self
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
            pool,
            indexes: Arc::new(indexes),
        }
    }

    fn doc_key(collection: &str, key: &str) -> String {
        format!("{}:doc:{}", collection, key)
    }

    fn keys_key(collection: &str) -> String {
        format!("{}:keys", collection)
    }

    fn index_key(collection: &str, field: &str) -> String {
        format!("{}:idx:{}", collection, field)
    }

    fn is_indexed(&self, collection: &str, field: &str) -> bool {
        self.indexes
            .contains(&(collection.to_string(), field.to_string()))
    }

    fn indexed_fields<'a>(&'a self, collection: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.indexes
            .iter()
            .filter(move |(c, _)| c == collection)
            .map(|(_, field)| field.as_str())
    }

    /// Sorted-set changes implied by `data`: the negated score, or `None` to
    /// drop the member. Unless `every_index` is set, only indexed fields
    /// present in `data` are touched.
    fn index_updates(
        &self,
        collection: &str,
        data: &Document,
        every_index: bool,
    ) -> Vec<(String, Option<f64>)> {
        let mut updates: Vec<(String, Option<f64>)> = self
            .indexed_fields(collection)
            .filter(|field| every_index || data.contains_key(*field))
            .map(|field| {
                (
                    Self::index_key(collection, field),
                    numeric_field(data, field).map(|score| -score),
                )
            })
            .collect();
        updates.sort_by(|a, b| a.0.cmp(&b.0));
        updates
    }

    async fn load_many(
        &self,
        collection: &str,
        keys: Vec<String>,
    ) -> StoreResult<Vec<KeyedDocument>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for key in &keys {
            pipe.hgetall(Self::doc_key(collection, key));
        }

        let mut conn = self.pool.get_connection().await?;
        let raw: Vec<HashMap<String, String>> = pipe.query_async(&mut conn).await?;

        keys.into_iter()
            .zip(raw)
            .map(|(key, fields)| -> StoreResult<KeyedDocument> {
                Ok((key, decode_fields(fields)?))
            })
            .collect()
    }

    async fn all_keys(&self, collection: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.pool.get_connection().await?;
        let mut keys: Vec<String> = conn.smembers(Self::keys_key(collection)).await?;
        keys.sort();
        Ok(keys)
    }
}

fn encode_fields(data: &Document) -> StoreResult<Vec<(String, String)>> {
    data.iter()
        .map(|(field, value)| -> StoreResult<(String, String)> {
            Ok((field.clone(), serde_json::to_string(value)?))
        })
        .collect()
}

fn decode_fields(fields: HashMap<String, String>) -> StoreResult<Document> {
    fields
        .into_iter()
        .map(|(field, json)| -> StoreResult<(String, serde_json::Value)> {
            Ok((field, serde_json::from_str(&json)?))
        })
        .collect()
}

/// Inclusive/exclusive ZCOUNT bounds over negated scores for `score <op> value`
fn negated_range(op: Comparison, value: f64) -> (String, String) {
    let negated = -value;
    match op {
        Comparison::GreaterThan => ("-inf".to_string(), format!("({}", negated)),
        Comparison::GreaterOrEqual => ("-inf".to_string(), negated.to_string()),
        Comparison::LessThan => (format!("({}", negated), "+inf".to_string()),
        Comparison::LessOrEqual => (negated.to_string(), "+inf".to_string()),
        Comparison::Equal => (negated.to_string(), negated.to_string()),
    }
}

#[async_trait]
impl RankedStore for RedisDocumentStore {
    async fn count(&self, collection: &str) -> StoreResult<u64> {
        let mut conn = self.pool.get_connection().await?;
        let count: u64 = conn.scard(Self::keys_key(collection)).await?;
        Ok(count)
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
        if n == 0 {
            return Ok(Vec::new());
        }

        debug!("top_n {}.{} limit {}", collection, field, n);
        let mut conn = self.pool.get_connection().await?;
        let keys: Vec<String> = conn
            .zrange(Self::index_key(collection, field), 0, n as isize - 1)
            .await?;

        self.load_many(collection, keys).await
    }

    async fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Document>> {
        let mut conn = self.pool.get_connection().await?;
        let (fields, exists): (HashMap<String, String>, bool) = redis::pipe()
            .hgetall(Self::doc_key(collection, key))
            .sismember(Self::keys_key(collection), key)
            .query_async(&mut conn)
            .await?;

        if !exists {
            return Ok(None);
        }
        Ok(Some(decode_fields(fields)?))
    }

    async fn count_where(
        &self,
        collection: &str,
        field: &str,
        op: Comparison,
        value: f64,
    ) -> StoreResult<u64> {
        if self.is_indexed(collection, field) {
            let (min, max) = negated_range(op, value);
            let mut conn = self.pool.get_connection().await?;
            let count: u64 = conn
                .zcount(Self::index_key(collection, field), min, max)
                .await?;
            return Ok(count);
        }

        // No sorted set for this field: filter every document client-side
        let keys = self.all_keys(collection).await?;
        let documents = self.load_many(collection, keys).await?;
        let count = documents
            .iter()
            .filter_map(|(_, doc)| numeric_field(doc, field))
            .filter(|score| op.matches(*score, value))
            .count();
        Ok(count as u64)
    }

    async fn fetch(&self, collection: &str, n: usize) -> StoreResult<Vec<KeyedDocument>> {
        let mut keys = self.all_keys(collection).await?;
        keys.truncate(n);
        self.load_many(collection, keys).await
    }

    async fn put(&self, collection: &str, key: &str, data: Document) -> StoreResult<()> {
        let doc_key = Self::doc_key(collection, key);
        let fields = encode_fields(&data)?;

        let mut pipe = redis::pipe();
        pipe.atomic().del(&doc_key).ignore();
        if !fields.is_empty() {
            pipe.hset_multiple(&doc_key, &fields).ignore();
        }
        pipe.sadd(Self::keys_key(collection), key).ignore();

        for (index, score) in self.index_updates(collection, &data, true) {
            match score {
                Some(score) => pipe.zadd(index, key, score).ignore(),
                None => pipe.zrem(index, key).ignore(),
            };
        }

        let mut conn = self.pool.get_connection().await?;
        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    async fn patch(&self, collection: &str, key: &str, data: Document) -> StoreResult<()> {
        let fields = encode_fields(&data)?;
        let updates = self.index_updates(collection, &data, false);

        let mut invocation = patch_script().prepare_invoke();
        invocation
            .key(Self::doc_key(collection, key))
            .key(Self::keys_key(collection));
        for (index, _) in &updates {
            invocation.key(index);
        }

        invocation.arg(key).arg(fields.len());
        for (field, value) in &fields {
            invocation.arg(field).arg(value);
        }
        for (_, score) in &updates {
            invocation.arg(score.map(|s| s.to_string()).unwrap_or_default());
        }

        let mut conn = self.pool.get_connection().await?;
        let applied: i64 = invocation.invoke_async(&mut conn).await?;
        if applied == 0 {
            return Err(StoreError::not_found(collection, key));
        }

        Ok(())
    }
}
