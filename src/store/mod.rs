//! Key-value table abstraction the diary store is built on.
//!
//! A table is keyed by the numeric entry id and exposes only point reads,
//! conditional writes, deletes and a full scan. Backends live in the
//! submodules; [`MemoryTable`] doubles as the fake used by tests.

pub mod memory;
pub mod postgres;
pub mod redis_table;

use async_trait::async_trait;
use thiserror::Error;

use crate::diary::models::DiaryEntry;

pub use memory::{CounterIdSource, MemoryTable};
pub use postgres::{PgIdSource, PgTable};
pub use redis_table::{RedisIdSource, RedisTable};

/// Infrastructure faults raised by a table backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record under key {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Precondition attached to a [`Table::put`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutCondition {
    /// Only write when no record exists under the key.
    IfAbsent,
    /// Only write when a record already exists under the key.
    IfPresent,
}

#[async_trait]
pub trait Table: Send + Sync {
    async fn get(&self, id: i64) -> StoreResult<Option<DiaryEntry>>;

    /// Writes `entry` under `entry.id` if `condition` holds. Returns whether
    /// the write took place.
    async fn put(&self, entry: &DiaryEntry, condition: PutCondition) -> StoreResult<bool>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Every record in the table, in no particular order.
    async fn scan(&self) -> StoreResult<Vec<DiaryEntry>>;
}

/// Hands out entry ids. Implementations must never return the same value
/// twice, even to concurrent callers.
#[async_trait]
pub trait IdSource: Send + Sync {
    async fn next_id(&self) -> StoreResult<i64>;
}
