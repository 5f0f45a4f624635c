use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::{IdSource, PutCondition, StoreError, StoreResult, Table};
use crate::diary::models::DiaryEntry;

const ITEM_PREFIX: &str = "diaries:item:";
const NEXT_ID_KEY: &str = "diaries:next_id";

fn item_key(id: i64) -> String {
    format!("{}{}", ITEM_PREFIX, id)
}

/// Table storing each entry as a JSON string under `diaries:item:{id}`.
#[derive(Clone)]
pub struct RedisTable {
    redis: ConnectionManager,
}

impl RedisTable {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    fn decode(key: &str, raw: &str) -> StoreResult<DiaryEntry> {
        serde_json::from_str(raw).map_err(|source| StoreError::Serialization {
            key: key.to_string(),
            source,
        })
    }

    fn encode(entry: &DiaryEntry) -> StoreResult<String> {
        serde_json::to_string(entry).map_err(|source| StoreError::Serialization {
            key: item_key(entry.id),
            source,
        })
    }
}

#[async_trait]
impl Table for RedisTable {
    async fn get(&self, id: i64) -> StoreResult<Option<DiaryEntry>> {
        let key = item_key(id);
        let mut conn = self.redis.clone();
        let value: Option<String> = conn.get(&key).await?;
        value.map(|raw| Self::decode(&key, &raw)).transpose()
    }

    async fn put(&self, entry: &DiaryEntry, condition: PutCondition) -> StoreResult<bool> {
        let key = item_key(entry.id);
        let value = Self::encode(entry)?;
        let flag = match condition {
            PutCondition::IfAbsent => "NX",
            PutCondition::IfPresent => "XX",
        };

        let mut conn = self.redis.clone();
        // SET replies OK when the write happened and nil when the flag blocked it
        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(value)
            .arg(flag)
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut conn = self.redis.clone();
        let removed: i64 = conn.del(item_key(id)).await?;
        Ok(removed > 0)
    }

    async fn scan(&self) -> StoreResult<Vec<DiaryEntry>> {
        let mut conn = self.redis.clone();
        let keys: Vec<String> = conn.keys(format!("{}*", ITEM_PREFIX)).await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for key in &keys {
            pipe.get(key);
        }
        let values: Vec<Option<String>> = pipe.query_async(&mut conn).await?;

        // a key deleted between KEYS and GET comes back as nil and is skipped
        keys.iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|raw| Self::decode(key, &raw)))
            .collect()
    }
}

/// `INCR` on a shared counter key, unique across every process using the
/// same Redis instance.
#[derive(Clone)]
pub struct RedisIdSource {
    redis: ConnectionManager,
}

impl RedisIdSource {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl IdSource for RedisIdSource {
    async fn next_id(&self) -> StoreResult<i64> {
        let mut conn = self.redis.clone();
        let id: i64 = conn.incr(NEXT_ID_KEY, 1).await?;
        Ok(id)
    }
}
