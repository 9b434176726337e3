// Resource domain module
// The resource entity and the changes that can be applied to it

#![allow(clippy::module_inception)]

pub mod resource;

// Re-export main types for convenience
pub use resource::{Properties, Resource, ResourceChanges};
