use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::{IdSource, PutCondition, StoreResult, Table};
use crate::diary::models::DiaryEntry;

/// In-process table backed by a `HashMap`. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTable {
    items: RwLock<HashMap<i64, DiaryEntry>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl Table for MemoryTable {
    async fn get(&self, id: i64) -> StoreResult<Option<DiaryEntry>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn put(&self, entry: &DiaryEntry, condition: PutCondition) -> StoreResult<bool> {
        let mut items = self.items.write().await;
        let exists = items.contains_key(&entry.id);
        let allowed = match condition {
            PutCondition::IfAbsent => !exists,
            PutCondition::IfPresent => exists,
        };
        if allowed {
            items.insert(entry.id, entry.clone());
        }
        Ok(allowed)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.items.write().await.remove(&id).is_some())
    }

    async fn scan(&self) -> StoreResult<Vec<DiaryEntry>> {
        Ok(self.items.read().await.values().cloned().collect())
    }
}

/// Monotonic counter starting at 1, shared by every clone of the store.
#[derive(Debug)]
pub struct CounterIdSource {
    next: AtomicI64,
}

impl CounterIdSource {
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(1),
        }
    }
}

impl Default for CounterIdSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdSource for CounterIdSource {
    async fn next_id(&self) -> StoreResult<i64> {
        Ok(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
