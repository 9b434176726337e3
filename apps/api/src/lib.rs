//! Resource API Library
//!
//! Session-gated CRUD service for generic resources (an id, a unique name and
//! an open property bag), plus the static UI server. Provides the domain
//! model, repositories, storage adapters and HTTP layer.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
