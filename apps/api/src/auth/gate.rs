// Session validation gate
// Runs before every protected handler; lazily deletes malformed and expired sessions

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

use super::session::{Session, SessionStore, SessionStoreError};

/// Why a request was turned away by the gate
#[derive(Debug, Error)]
pub enum SessionRejection {
    #[error("no session id")]
    MissingSessionId,

    #[error("no active session")]
    NoActiveSession,

    #[error("malformed session")]
    Malformed,

    #[error("session expired")]
    Expired,

    #[error("session store failure: {0}")]
    Store(#[from] SessionStoreError),
}

/// Validates the caller's session
///
/// # Arguments
/// * `store` - Session store to consult
/// * `session_id` - Value of the session cookie, if any
/// * `now` - Current instant; a session is expired when `now >= expires_at`
///
/// # Returns
/// * `Ok(Session)` - The live session; nothing is modified
/// * `Err(SessionRejection)` - The request must not proceed
///
/// # Side effects
/// Malformed (no expiry) and expired sessions are deleted from the store.
/// A failed delete is logged and does not change the rejection.
pub async fn validate_session(
    store: &dyn SessionStore,
    session_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Session, SessionRejection> {
    let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
        warn!("No session_id found in cookies");
        return Err(SessionRejection::MissingSessionId);
    };

    info!(session_id, "Checking session from cookies");
    let session = store
        .get_session(session_id)
        .await
        .map_err(|e| {
            error!(session_id, error = %e, "Session lookup failed");
            SessionRejection::Store(e)
        })?
        .ok_or_else(|| {
            warn!(session_id, "No active session found");
            SessionRejection::NoActiveSession
        })?;

    let Some(expires_at) = session.expires_at else {
        warn!(session_id, "Session data malformed, deleting session");
        discard(store, session_id).await;
        return Err(SessionRejection::Malformed);
    };

    if session.is_expired_at(now) {
        info!(session_id, %expires_at, "Session has expired, deleting session");
        discard(store, session_id).await;
        return Err(SessionRejection::Expired);
    }

    info!(session_id, "Session is valid");
    Ok(session)
}

async fn discard(store: &dyn SessionStore, session_id: &str) {
    if let Err(e) = store.delete_session(session_id).await {
        error!(session_id, error = %e, "Failed to delete invalid session");
    }
}
