use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::auth::session::{Session, SessionStore, SessionStoreError};

/// In-memory implementation of SessionStore
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a session
    pub async fn insert(&self, session: Session) {
        debug!(session_id = %session.session_id, "Storing session");
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session);
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), SessionStoreError> {
        if self.sessions.write().await.remove(session_id).is_some() {
            debug!(session_id, "Deleted session");
        }
        Ok(())
    }
}
