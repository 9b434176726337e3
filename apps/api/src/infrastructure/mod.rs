// Infrastructure layer module
// Contains storage adapters and session stores
// Follows Hexagonal Architecture

pub mod repositories;
pub mod sessions;
pub mod storage;
