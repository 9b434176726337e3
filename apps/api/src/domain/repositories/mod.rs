// Repository contracts (ports)
// Implemented by adapters in the infrastructure layer

pub mod resource_repository;

pub use resource_repository::{RepositoryError, RepositoryResult, ResourceRepository};
