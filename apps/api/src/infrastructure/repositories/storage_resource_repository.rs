use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::repositories::{RepositoryError, RepositoryResult, ResourceRepository};
use crate::domain::resource::{Resource, ResourceChanges};
use crate::infrastructure::storage::{Record, StorageAdapter, StorageError};

/// Collection resources are stored under
pub const RESOURCES_COLLECTION: &str = "resources";

/// ResourceRepository backed by any StorageAdapter
///
/// Translates resource operations into generic record calls and storage
/// failures into typed `RepositoryError`s. Never panics on bad data: a record
/// that does not deserialize into a `Resource` is reported as a storage error.
pub struct StorageResourceRepository {
    storage: Arc<dyn StorageAdapter>,
}

impl StorageResourceRepository {
    /// Creates a new StorageResourceRepository
    ///
    /// # Arguments
    /// * `storage` - Shared storage adapter handle
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self { storage }
    }
}

impl From<StorageError> for RepositoryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict { detail, .. } => RepositoryError::Conflict(detail),
            other => RepositoryError::Storage(other.to_string()),
        }
    }
}

fn to_record<T: serde::Serialize>(value: &T) -> Result<Record, StorageError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(StorageError::InvalidRecord(
            "resource did not serialize to an object".to_string(),
        )),
        Err(e) => Err(StorageError::InvalidRecord(e.to_string())),
    }
}

fn from_record(record: Record) -> Result<Resource, StorageError> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| StorageError::InvalidRecord(format!("malformed resource record: {}", e)))
}

#[async_trait]
impl ResourceRepository for StorageResourceRepository {
    async fn create(&self, resource: &Resource) -> RepositoryResult<Resource> {
        info!(name = resource.name(), "Creating resource");

        let result = async {
            let record = to_record(resource)?;
            let stored = self
                .storage
                .create_record(RESOURCES_COLLECTION, record)
                .await?;
            from_record(stored)
        }
        .await;

        match result {
            Ok(created) => {
                info!(id = created.id(), "Resource created successfully");
                Ok(created)
            }
            Err(e) => {
                error!(name = resource.name(), error = %e, "Error creating resource");
                Err(e.into())
            }
        }
    }

    async fn get(&self, id: &str) -> RepositoryResult<Option<Resource>> {
        info!(id, "Retrieving resource");

        let record = self
            .storage
            .get_record_by_id(RESOURCES_COLLECTION, id)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Error retrieving resource");
                RepositoryError::from(e)
            })?;

        match record {
            Some(record) => {
                let resource = from_record(record)?;
                info!(id, "Resource retrieved successfully");
                Ok(Some(resource))
            }
            None => {
                warn!(id, "Resource not found");
                Ok(None)
            }
        }
    }

    async fn get_by_name(&self, name: &str) -> RepositoryResult<Option<Resource>> {
        info!(name, "Retrieving resource by name");

        let record = self
            .storage
            .find_record_by_field(RESOURCES_COLLECTION, "name", &Value::from(name))
            .await
            .map_err(|e| {
                error!(name, error = %e, "Error retrieving resource by name");
                RepositoryError::from(e)
            })?;

        match record {
            Some(record) => {
                info!(name, "Resource retrieved successfully by name");
                Ok(Some(from_record(record)?))
            }
            None => {
                warn!(name, "Resource not found by name");
                Ok(None)
            }
        }
    }

    async fn update(&self, id: &str, changes: &ResourceChanges) -> RepositoryResult<Resource> {
        info!(id, ?changes, "Updating resource");

        let partial = to_record(changes)?;
        let updated = self
            .storage
            .update_record(RESOURCES_COLLECTION, id, partial)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Error updating resource");
                RepositoryError::from(e)
            })?;

        match updated {
            Some(record) => {
                info!(id, "Resource updated successfully");
                Ok(from_record(record)?)
            }
            None => {
                warn!(id, "Resource not found for update");
                Err(RepositoryError::NotFound(id.to_string()))
            }
        }
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        info!(id, "Deleting resource");

        let deleted = self
            .storage
            .delete_record(RESOURCES_COLLECTION, id)
            .await
            .map_err(|e| {
                error!(id, error = %e, "Error deleting resource");
                RepositoryError::from(e)
            })?;

        if deleted {
            info!(id, "Resource deleted successfully");
            Ok(())
        } else {
            warn!(id, "Resource not found for delete");
            Err(RepositoryError::NotFound(id.to_string()))
        }
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Resource>> {
        info!("Retrieving all resources");

        let records = self
            .storage
            .get_all_records(RESOURCES_COLLECTION)
            .await
            .map_err(|e| {
                error!(error = %e, "Error retrieving all resources");
                RepositoryError::from(e)
            })?;

        let resources = records
            .into_iter()
            .map(from_record)
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = resources.len(), "Successfully retrieved resources");
        Ok(resources)
    }
}
