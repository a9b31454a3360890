use chrono::Duration;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    generators::{SessionIdGenerator, UuidSessionIdGenerator},
    models::SessionModel,
    repository::SessionRepository,
};
use crate::shared::AppError;

/// Expiry policy applied to newly issued sessions
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// `None` means sessions live until revoked
    pub duration: Option<Duration>,
}

/// Issues, resolves and revokes session tokens over an injected store
pub struct SessionRegistry {
    repository: Arc<dyn SessionRepository + Send + Sync>,
    id_generator: Arc<dyn SessionIdGenerator>,
    config: SessionConfig,
}

impl SessionRegistry {
    pub fn new(repository: Arc<dyn SessionRepository + Send + Sync>, config: SessionConfig) -> Self {
        Self::with_generator(repository, Arc::new(UuidSessionIdGenerator::new()), config)
    }

    pub fn with_generator(
        repository: Arc<dyn SessionRepository + Send + Sync>,
        id_generator: Arc<dyn SessionIdGenerator>,
        config: SessionConfig,
    ) -> Self {
        Self {
            repository,
            id_generator,
            config,
        }
    }

    /// Issues a fresh session id bound to `user_ref`
    #[instrument(skip(self))]
    pub async fn create(&self, user_ref: &str) -> Result<String, AppError> {
        if user_ref.is_empty() {
            warn!("Refusing to create a session without a user reference");
            return Err(AppError::BadRequest("user reference is required".to_string()));
        }

        let session = SessionModel::new(
            self.id_generator.generate(),
            user_ref.to_string(),
            self.config.duration,
        );
        self.repository.create_session(&session).await?;

        info!(
            user_id = %user_ref,
            expires_at = ?session.expires_at,
            "Session created"
        );
        Ok(session.id)
    }

    /// Returns the user bound to `session_id`
    ///
    /// An expired session is deleted on sight, so it reports `SessionExpired`
    /// once and `SessionNotFound` from then on.
    #[instrument(skip(self, session_id))]
    pub async fn resolve(&self, session_id: &str) -> Result<String, AppError> {
        let session = self
            .repository
            .get_session(session_id)
            .await?
            .ok_or(AppError::SessionNotFound)?;

        if session.is_expired() {
            warn!(user_id = %session.user_id, "Session has expired, discarding it");
            match self.repository.delete_session(session_id).await {
                // A concurrent sweep may have removed it first
                Ok(()) | Err(AppError::SessionNotFound) => {}
                Err(e) => return Err(e),
            }
            return Err(AppError::SessionExpired);
        }

        Ok(session.user_id)
    }

    /// Destroys the session; revoking an unknown id reports `SessionNotFound`
    #[instrument(skip(self, session_id))]
    pub async fn revoke(&self, session_id: &str) -> Result<(), AppError> {
        if let Err(e) = self.repository.delete_session(session_id).await {
            warn!(error = %e, "Session revocation failed");
            return Err(e);
        }

        info!("Session revoked");
        Ok(())
    }

    /// Removes every expired session, returning how many were dropped
    #[instrument(skip(self))]
    pub async fn cleanup_expired(&self) -> Result<u64, AppError> {
        let removed_count = self.repository.cleanup_expired_sessions().await?;
        info!(removed_sessions = removed_count, "Expired sessions cleanup completed");
        Ok(removed_count)
    }
}
