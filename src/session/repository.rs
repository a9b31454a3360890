use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::SessionModel;
use crate::shared::AppError;

/// Trait for session storage operations
#[async_trait]
pub trait SessionRepository {
    async fn create_session(&self, session: &SessionModel) -> Result<(), AppError>;
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionModel>, AppError>;
    async fn delete_session(&self, session_id: &str) -> Result<(), AppError>;
    async fn cleanup_expired_sessions(&self) -> Result<u64, AppError>;
}

/// In-memory implementation of SessionRepository
///
/// Every operation takes the same lock, so read-modify-write sequences on the
/// map never interleave. Data is lost when the process exits.
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<String, SessionModel>>,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated sessions
    pub fn with_sessions(sessions: Vec<SessionModel>) -> Self {
        let session_map = sessions
            .into_iter()
            .map(|session| (session.id.clone(), session))
            .collect();

        Self {
            sessions: Mutex::new(session_map),
        }
    }

    /// Returns the current number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn has_session(&self, session_id: &str) -> bool {
        self.sessions.lock().await.contains_key(session_id)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self, session))]
    async fn create_session(&self, session: &SessionModel) -> Result<(), AppError> {
        debug!(user_id = %session.user_id, "Creating session in memory");

        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&session.id) {
            warn!(user_id = %session.user_id, "Session id already in use");
            return Err(AppError::DatabaseError(
                "Session already exists".to_string(),
            ));
        }
        sessions.insert(session.id.clone(), session.clone());

        debug!(active_sessions = sessions.len(), "Session stored in memory");
        Ok(())
    }

    #[instrument(skip(self, session_id))]
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionModel>, AppError> {
        let sessions = self.sessions.lock().await;
        let session = sessions.get(session_id).cloned();

        match &session {
            Some(s) => debug!(user_id = %s.user_id, "Session found in memory"),
            None => debug!("Session not found in memory"),
        }

        Ok(session)
    }

    #[instrument(skip(self, session_id))]
    async fn delete_session(&self, session_id: &str) -> Result<(), AppError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(session_id).is_none() {
            debug!("Session not found for deletion in memory");
            return Err(AppError::SessionNotFound);
        }

        debug!(active_sessions = sessions.len(), "Session deleted from memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn cleanup_expired_sessions(&self) -> Result<u64, AppError> {
        let mut sessions = self.sessions.lock().await;
        let now = Utc::now();
        let initial_count = sessions.len();

        sessions.retain(|_, session| !session.is_expired_at(now));

        let removed_count = initial_count - sessions.len();
        debug!(
            expired_sessions_removed = removed_count,
            "Expired sessions cleaned up from memory"
        );
        Ok(removed_count as u64)
    }
}

/// PostgreSQL implementation of session repository
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    #[instrument(skip(self, session))]
    async fn create_session(&self, session: &SessionModel) -> Result<(), AppError> {
        debug!(user_id = %session.user_id, "Creating session in database");

        sqlx::query(
            "INSERT INTO user_sessions (id, user_id, created_at, expires_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create session in database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self, session_id))]
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionModel>, AppError> {
        let session = sqlx::query_as::<_, SessionModel>(
            "SELECT id, user_id, created_at, expires_at FROM user_sessions WHERE id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch session from database");
            AppError::DatabaseError(e.to_string())
        })?;

        match &session {
            Some(s) => debug!(user_id = %s.user_id, "Session found in database"),
            None => debug!("Session not found in database"),
        }

        Ok(session)
    }

    #[instrument(skip(self, session_id))]
    async fn delete_session(&self, session_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to delete session from database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            debug!("Session not found for deletion");
            return Err(AppError::SessionNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn cleanup_expired_sessions(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM user_sessions WHERE expires_at IS NOT NULL AND expires_at < $1",
        )
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to cleanup expired sessions");
            AppError::DatabaseError(e.to_string())
        })?;

        let rows_affected = result.rows_affected();
        debug!(
            expired_sessions_removed = rows_affected,
            "Expired sessions cleaned up"
        );
        Ok(rows_affected)
    }
}
