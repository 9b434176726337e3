use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::auth::session::{Session, SessionStore, SessionStoreError};

/// PostgreSQL implementation of SessionStore
///
/// Reads the `sessions` table populated by the login flow.
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a new PostgresSessionStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace a session
    pub async fn save_session(&self, session: &Session) -> Result<(), SessionStoreError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (session_id, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (session_id) DO UPDATE SET
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(&session.session_id)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, SessionStoreError> {
        let row: Option<(String, Option<DateTime<Utc>>)> = sqlx::query_as(
            r#"
            SELECT session_id, expires_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(session_id, expires_at)| Session {
            session_id,
            expires_at,
        }))
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), SessionStoreError> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
