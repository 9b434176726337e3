// Server-side sessions referenced by the `session_id` cookie
// Sessions are written by the login flow; this service only reads and expires them

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "session_id";

/// Session record
///
/// # Fields
/// * `session_id` - Primary key in the session store
/// * `expires_at` - Expiry instant; `None` marks a malformed session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session expiring at the given instant
    pub fn new(session_id: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            expires_at: Some(expires_at),
        }
    }

    /// True when `now` is at or past the expiry. Sessions without an expiry
    /// are never considered expired here; callers treat them as malformed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }
}

/// Error type for session store operations
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Session store used by the session gate
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a session by id
    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, SessionStoreError>;

    /// Remove a session; removing an unknown id is not an error
    async fn delete_session(&self, session_id: &str) -> Result<(), SessionStoreError>;
}

/// Shared handle injected through application state
pub type SessionStoreRef = Arc<dyn SessionStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn session_in_the_future_is_live() {
        let now = Utc::now();
        let session = Session::new("s", now + Duration::minutes(5));
        assert!(!session.is_expired_at(now));
    }

    #[test]
    fn session_expires_exactly_at_expiry() {
        let now = Utc::now();
        let session = Session::new("s", now);
        assert!(session.is_expired_at(now));
        assert!(session.is_expired_at(now + Duration::seconds(1)));
    }

    #[test]
    fn session_without_expiry_is_not_reported_expired() {
        let session = Session {
            session_id: "s".to_string(),
            expires_at: None,
        };
        assert!(!session.is_expired_at(Utc::now()));
    }
}
