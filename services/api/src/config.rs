//! Service configuration loaded from `APP_*` environment variables

use ::config::{Config, ConfigError, Environment};
use ranking::{DEFAULT_RANKED_LIMIT, DEFAULT_TOP_COUNT};
use serde::Deserialize;

/// Which `RankedStore` backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
    Redis,
}

/// API service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (`APP_BIND_ADDR`, default "0.0.0.0:3001")
    pub bind_addr: String,
    /// Storage backend (`APP_STORE_BACKEND`, default "memory")
    pub store_backend: StoreBackend,
    /// Leaderboard rows when the request does not say (`APP_TOP_COUNT`)
    pub top_count: usize,
    /// Ranked list length when the request does not say (`APP_RANKED_LIMIT`)
    pub ranked_limit: usize,
}

impl ApiConfig {
    /// Load the configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:3001")?
            .set_default("store_backend", "memory")?
            .set_default("top_count", DEFAULT_TOP_COUNT as i64)?
            .set_default("ranked_limit", DEFAULT_RANKED_LIMIT as i64)?
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
