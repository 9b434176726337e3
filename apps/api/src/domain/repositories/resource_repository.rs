use async_trait::async_trait;
use thiserror::Error;

use crate::domain::resource::{Resource, ResourceChanges};

/// Errors surfaced by the resource access layer
///
/// Absence on reads is not an error (`Ok(None)`); only writes against a
/// missing id report `NotFound`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource already exists: {0}")]
    Conflict(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository trait for Resource entities
///
/// Defines the contract for persisting and retrieving resources.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Insert a new resource
    async fn create(&self, resource: &Resource) -> RepositoryResult<Resource>;

    /// Find a resource by its ID
    async fn get(&self, id: &str) -> RepositoryResult<Option<Resource>>;

    /// Find the first resource with exactly this name (case-sensitive)
    async fn get_by_name(&self, name: &str) -> RepositoryResult<Option<Resource>>;

    /// Apply a partial update, failing with `NotFound` for an unknown id
    async fn update(&self, id: &str, changes: &ResourceChanges) -> RepositoryResult<Resource>;

    /// Delete a resource by ID, failing with `NotFound` for an unknown id
    async fn delete(&self, id: &str) -> RepositoryResult<()>;

    /// All resources in insertion order
    async fn list_all(&self) -> RepositoryResult<Vec<Resource>>;
}
