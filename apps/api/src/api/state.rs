use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{SessionStore, SessionStoreRef};
use crate::domain::repositories::ResourceRepository;
use crate::infrastructure::repositories::StorageResourceRepository;
use crate::infrastructure::storage::StorageAdapter;

/// Shared application state handed to every handler
///
/// Both collaborators are injected so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub resources: Arc<dyn ResourceRepository>,
    pub sessions: SessionStoreRef,
}

impl AppState {
    /// Creates state from explicit collaborators
    pub fn new(resources: Arc<dyn ResourceRepository>, sessions: SessionStoreRef) -> Self {
        Self {
            resources,
            sessions,
        }
    }

    /// Wires the resource access layer over a storage adapter
    pub fn from_storage(
        storage: Arc<dyn StorageAdapter>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self::new(Arc::new(StorageResourceRepository::new(storage)), sessions)
    }
}

impl FromRef<AppState> for SessionStoreRef {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
