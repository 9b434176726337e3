// Storage adapters (generic record persistence)
// Records are JSON objects keyed by collection name and their "id" field

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStorage;
pub use postgres::PostgresStorage;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A stored record: a JSON object carrying at least a string `id` field
pub type Record = Map<String, Value>;

/// Field every record is keyed by
pub const ID_FIELD: &str = "id";

/// Errors raised by storage adapters
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("record already exists in {collection}: {detail}")]
    Conflict { collection: String, detail: String },

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Uniform interface over a persistent record store
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Insert a new record. The record must carry a string `id`.
    async fn create_record(&self, collection: &str, data: Record) -> StorageResult<Record>;

    /// Fetch a record by id, `None` if absent
    async fn get_record_by_id(&self, collection: &str, id: &str) -> StorageResult<Option<Record>>;

    /// Shallow-merge `partial` into the stored record's top-level keys.
    /// Returns the merged record, or `None` if the id does not exist.
    async fn update_record(
        &self,
        collection: &str,
        id: &str,
        partial: Record,
    ) -> StorageResult<Option<Record>>;

    /// Delete a record by id. Returns `false` if nothing was deleted.
    async fn delete_record(&self, collection: &str, id: &str) -> StorageResult<bool>;

    /// All records of a collection, in insertion order
    async fn get_all_records(&self, collection: &str) -> StorageResult<Vec<Record>>;

    /// First record (in insertion order) whose `field` equals `value`
    ///
    /// The default implementation scans `get_all_records`; adapters with a
    /// secondary index should override it.
    async fn find_record_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StorageResult<Option<Record>> {
        let records = self.get_all_records(collection).await?;
        Ok(records
            .into_iter()
            .find(|record| record.get(field) == Some(value)))
    }
}

/// Extracts the string id of a record
pub fn record_id(record: &Record) -> StorageResult<&str> {
    record
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| StorageError::InvalidRecord("record has no string `id` field".to_string()))
}
