use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AppConfig;
use crate::session::registry::SessionRegistry;
use crate::user::{password::CredentialsHasher, repository::UserRepository, service::UserService};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub session_registry: Arc<SessionRegistry>,
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
    pub password_hasher: Arc<dyn CredentialsHasher>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        session_registry: Arc<SessionRegistry>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        password_hasher: Arc<dyn CredentialsHasher>,
        config: AppConfig,
    ) -> Self {
        Self {
            session_registry,
            user_repository,
            password_hasher,
            config: Arc::new(config),
        }
    }

    /// Builds a user service over the injected store and hasher
    pub fn user_service(&self) -> UserService {
        UserService::new(
            Arc::clone(&self.user_repository),
            Arc::clone(&self.password_hasher),
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Session expired")]
    SessionExpired,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Password hashing failed")]
    PasswordHash,

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::SessionNotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::SessionExpired | AppError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            // Duplicate registrations are reported as a plain bad request
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::PasswordHash | AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
