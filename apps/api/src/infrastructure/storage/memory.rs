use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{record_id, Record, StorageAdapter, StorageError, StorageResult, ID_FIELD};

#[derive(Debug, Default)]
struct Collection {
    records: HashMap<String, Record>,
    // insertion order of ids
    order: Vec<String>,
}

/// In-memory implementation of StorageAdapter
///
/// Used when no database is configured and throughout the test suite.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryStorage {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageAdapter for InMemoryStorage {
    async fn create_record(&self, collection: &str, data: Record) -> StorageResult<Record> {
        let id = record_id(&data)?.to_string();

        let mut collections = self.collections.write().await;
        let entry = collections.entry(collection.to_string()).or_default();

        if entry.records.contains_key(&id) {
            return Err(StorageError::Conflict {
                collection: collection.to_string(),
                detail: format!("duplicate id {}", id),
            });
        }

        entry.order.push(id.clone());
        entry.records.insert(id.clone(), data.clone());
        debug!(collection, id = %id, "record inserted");

        Ok(data)
    }

    async fn get_record_by_id(&self, collection: &str, id: &str) -> StorageResult<Option<Record>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|c| c.records.get(id))
            .cloned())
    }

    async fn update_record(
        &self,
        collection: &str,
        id: &str,
        partial: Record,
    ) -> StorageResult<Option<Record>> {
        let mut collections = self.collections.write().await;
        let Some(record) = collections
            .get_mut(collection)
            .and_then(|c| c.records.get_mut(id))
        else {
            return Ok(None);
        };

        for (key, value) in partial {
            // the id is the record key and never changes
            if key != ID_FIELD {
                record.insert(key, value);
            }
        }

        Ok(Some(record.clone()))
    }

    async fn delete_record(&self, collection: &str, id: &str) -> StorageResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(entry) = collections.get_mut(collection) else {
            return Ok(false);
        };

        if entry.records.remove(id).is_none() {
            return Ok(false);
        }
        entry.order.retain(|existing| existing != id);

        Ok(true)
    }

    async fn get_all_records(&self, collection: &str) -> StorageResult<Vec<Record>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|c| {
                c.order
                    .iter()
                    .filter_map(|id| c.records.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}
