use redis::aio::ConnectionManager;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{Config, StoreBackend};
use crate::diary::DiaryStore;
use crate::store::{PgIdSource, PgTable, RedisIdSource, RedisTable};

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to connect to Postgres: {0}")]
    Postgres(#[from] sqlx::Error),

    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("failed to connect to Redis: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("no connection url configured for the {0} backend")]
    MissingUrl(StoreBackend),
}

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

pub async fn create_redis_client(redis_url: &str) -> Result<ConnectionManager, redis::RedisError> {
    let client = redis::Client::open(redis_url)?;
    ConnectionManager::new(client).await
}

/// Applies the bundled migrations (`diaries` table and id sequence).
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}

/// Opens whatever connection the configured backend needs and wires up the
/// matching table and id source.
pub async fn connect_diary_store(config: &Config) -> Result<DiaryStore, ConnectError> {
    let store = match config.store_backend {
        StoreBackend::Memory => DiaryStore::in_memory(),
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or(ConnectError::MissingUrl(StoreBackend::Redis))?;
            let redis = create_redis_client(url).await?;
            DiaryStore::new(
                Arc::new(RedisTable::new(redis.clone())),
                Arc::new(RedisIdSource::new(redis)),
            )
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(ConnectError::MissingUrl(StoreBackend::Postgres))?;
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            DiaryStore::new(
                Arc::new(PgTable::new(pool.clone())),
                Arc::new(PgIdSource::new(pool)),
            )
        }
    };

    tracing::info!(backend = %config.store_backend, "Diary store ready");
    Ok(store)
}
