// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod storage_resource_repository;

pub use storage_resource_repository::{StorageResourceRepository, RESOURCES_COLLECTION};
