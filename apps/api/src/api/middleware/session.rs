use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;

use crate::api::errors::ApiError;
use crate::auth::{validate_session, Session, SessionStoreRef, SESSION_COOKIE};

/// Session gate extractor for protected routes
///
/// Reads the `session_id` cookie and validates it against the session store
/// in state. Rejects with 403 before the handler (and its body extractor) runs.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     ActiveSession(session): ActiveSession,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello session {}", session.session_id))
/// }
/// ```
pub struct ActiveSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for ActiveSession
where
    S: Send + Sync,
    SessionStoreRef: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar.get(SESSION_COOKIE).map(|cookie| cookie.value());

        let store = SessionStoreRef::from_ref(state);
        let session = validate_session(store.as_ref(), session_id, Utc::now()).await?;

        Ok(ActiveSession(session))
    }
}
