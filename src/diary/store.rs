use std::sync::Arc;

use crate::diary::error::DiaryError;
use crate::diary::models::DiaryEntry;
use crate::store::{CounterIdSource, IdSource, MemoryTable, PutCondition, Table};

/// Domain operations on diary entries over a key-value [`Table`].
///
/// Cheap to clone; clones share the same table and id source.
#[derive(Clone)]
pub struct DiaryStore {
    table: Arc<dyn Table>,
    ids: Arc<dyn IdSource>,
}

impl DiaryStore {
    pub fn new(table: Arc<dyn Table>, ids: Arc<dyn IdSource>) -> Self {
        Self { table, ids }
    }

    /// Store backed by a fresh [`MemoryTable`] and counter.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTable::new()), Arc::new(CounterIdSource::new()))
    }

    pub async fn create(&self, title: String, content: String) -> Result<DiaryEntry, DiaryError> {
        loop {
            let entry = DiaryEntry {
                id: self.ids.next_id().await?,
                title: title.clone(),
                content: content.clone(),
            };

            if self.table.put(&entry, PutCondition::IfAbsent).await? {
                return Ok(entry);
            }

            // only reachable when the id source was reset behind an existing table
            tracing::warn!(diary_id = entry.id, "Allocated id already taken, drawing another");
        }
    }

    pub async fn get(&self, id: i64) -> Result<DiaryEntry, DiaryError> {
        self.table.get(id).await?.ok_or(DiaryError::NotFound)
    }

    pub async fn list(&self) -> Result<Vec<DiaryEntry>, DiaryError> {
        let mut entries = self.table.scan().await?;
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }

    pub async fn update(
        &self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<DiaryEntry, DiaryError> {
        let entry = DiaryEntry { id, title, content };
        if self.table.put(&entry, PutCondition::IfPresent).await? {
            Ok(entry)
        } else {
            Err(DiaryError::NotFound)
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), DiaryError> {
        if self.table.delete(id).await? {
            Ok(())
        } else {
            Err(DiaryError::NotFound)
        }
    }
}
