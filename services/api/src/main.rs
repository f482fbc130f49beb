use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod models;
mod routes;
mod state;

use common::{
    InMemoryStore, RankedStore, USERS_COLLECTION,
    cache::{RedisConfig, RedisDocumentStore, RedisPool},
    database::{self, DatabaseConfig, PgDocumentStore},
};
use ranking::models::TOTAL_SCORE_FIELD;
use tokio::net::TcpListener;

use crate::{
    config::{ApiConfig, StoreBackend},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting ranking API service");

    let config = ApiConfig::from_env()?;
    let store = build_store(config.store_backend).await?;

    let app = routes::create_router(AppState::new(store, &config));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Ranking API listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Connect the configured backend
async fn build_store(backend: StoreBackend) -> Result<Arc<dyn RankedStore>> {
    match backend {
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = database::init_pool(&db_config).await?;

            if !database::health_check(&pool).await? {
                anyhow::bail!("Failed to connect to database");
            }
            database::ensure_schema(&pool).await?;
            info!("Database connection successful");

            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
        StoreBackend::Redis => {
            let redis_config = RedisConfig::from_env()?;
            let pool = RedisPool::new(&redis_config).await?;

            if !pool.health_check().await? {
                anyhow::bail!("Failed to connect to Redis");
            }
            info!("Redis connection successful");

            Ok(Arc::new(RedisDocumentStore::new(
                pool,
                [(USERS_COLLECTION, TOTAL_SCORE_FIELD)],
            )))
        }
    }
}
