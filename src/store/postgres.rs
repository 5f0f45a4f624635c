use async_trait::async_trait;
use sqlx::PgPool;

use super::{IdSource, PutCondition, StoreResult, Table};
use crate::diary::models::DiaryEntry;

/// Table backed by the `diaries` relation created in `migrations/`.
#[derive(Clone, Debug)]
pub struct PgTable {
    db: PgPool,
}

impl PgTable {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Table for PgTable {
    async fn get(&self, id: i64) -> StoreResult<Option<DiaryEntry>> {
        let entry = sqlx::query_as::<_, DiaryEntry>(
            "SELECT id, title, content FROM diaries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(entry)
    }

    async fn put(&self, entry: &DiaryEntry, condition: PutCondition) -> StoreResult<bool> {
        let query = match condition {
            PutCondition::IfAbsent => {
                r#"
                INSERT INTO diaries (id, title, content)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                "#
            }
            PutCondition::IfPresent => {
                r#"
                UPDATE diaries
                SET title = $2,
                    content = $3
                WHERE id = $1
                "#
            }
        };

        let result = sqlx::query(query)
            .bind(entry.id)
            .bind(&entry.title)
            .bind(&entry.content)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM diaries WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn scan(&self) -> StoreResult<Vec<DiaryEntry>> {
        let entries = sqlx::query_as::<_, DiaryEntry>("SELECT id, title, content FROM diaries")
            .fetch_all(&self.db)
            .await?;
        Ok(entries)
    }
}

/// Draws ids from the `diaries_id_seq` sequence.
#[derive(Clone, Debug)]
pub struct PgIdSource {
    db: PgPool,
}

impl PgIdSource {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdSource for PgIdSource {
    async fn next_id(&self) -> StoreResult<i64> {
        let (id,): (i64,) = sqlx::query_as("SELECT nextval('diaries_id_seq')")
            .fetch_one(&self.db)
            .await?;
        Ok(id)
    }
}
