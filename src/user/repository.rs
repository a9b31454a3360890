use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::UserModel;
use crate::shared::AppError;

/// Trait for user store operations
#[async_trait]
pub trait UserRepository {
    async fn add_user(&self, user: &UserModel) -> Result<(), AppError>;
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserModel>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError>;
    async fn find_by_reset_token(&self, reset_token: &str)
        -> Result<Option<UserModel>, AppError>;
    async fn update_user(&self, user: &UserModel) -> Result<(), AppError>;
}

/// In-memory implementation of UserRepository, keyed by user id
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, UserModel>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub(crate) async fn user_count(&self) -> usize {
        self.users.lock().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user))]
    async fn add_user(&self, user: &UserModel) -> Result<(), AppError> {
        let mut users = self.users.lock().await;
        if users.values().any(|existing| existing.email == user.email) {
            warn!(user_id = %user.id, "Email already registered");
            return Err(AppError::Conflict("email already registered".to_string()));
        }
        users.insert(user.id.clone(), user.clone());

        debug!(user_id = %user.id, "User stored in memory");
        Ok(())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserModel>, AppError> {
        Ok(self.users.lock().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        let users = self.users.lock().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_reset_token(
        &self,
        reset_token: &str,
    ) -> Result<Option<UserModel>, AppError> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .find(|user| user.reset_token.as_deref() == Some(reset_token))
            .cloned())
    }

    #[instrument(skip(self, user))]
    async fn update_user(&self, user: &UserModel) -> Result<(), AppError> {
        let mut users = self.users.lock().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                debug!(user_id = %user.id, "User updated in memory");
                Ok(())
            }
            None => {
                warn!(user_id = %user.id, "User not found for update in memory");
                Err(AppError::NotFound("User not found".to_string()))
            }
        }
    }
}

/// PostgreSQL implementation of the user store
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(
        &self,
        column: &'static str,
        value: &str,
    ) -> Result<Option<UserModel>, AppError> {
        let query = format!(
            "SELECT id, email, hashed_password, reset_token FROM users WHERE {} = $1",
            column
        );

        sqlx::query_as::<_, UserModel>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, column, "Failed to fetch user from database");
                AppError::DatabaseError(e.to_string())
            })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, user))]
    async fn add_user(&self, user: &UserModel) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO users (id, email, hashed_password, reset_token) VALUES ($1, $2, $3, $4)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(&user.reset_token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);
            if unique_violation {
                AppError::Conflict("email already registered".to_string())
            } else {
                warn!(error = %e, "Failed to create user in database");
                AppError::DatabaseError(e.to_string())
            }
        })?;

        debug!(user_id = %user.id, "User created in database");
        Ok(())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserModel>, AppError> {
        self.fetch_one_by("id", user_id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        self.fetch_one_by("email", email).await
    }

    async fn find_by_reset_token(
        &self,
        reset_token: &str,
    ) -> Result<Option<UserModel>, AppError> {
        self.fetch_one_by("reset_token", reset_token).await
    }

    #[instrument(skip(self, user))]
    async fn update_user(&self, user: &UserModel) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET email = $2, hashed_password = $3, reset_token = $4 WHERE id = $1",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(&user.reset_token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %user.id, "Failed to update user in database");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            warn!(user_id = %user.id, "User not found for update");
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }
}
