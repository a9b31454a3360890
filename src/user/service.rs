use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{models::UserModel, password::CredentialsHasher, repository::UserRepository};
use crate::shared::AppError;

/// Service for user registration, credential checks and password resets
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    hasher: Arc<dyn CredentialsHasher>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        hasher: Arc<dyn CredentialsHasher>,
    ) -> Self {
        Self { repository, hasher }
    }

    /// Registers a new user, refusing an email that is already taken
    #[instrument(skip(self, password))]
    pub async fn register_user(&self, email: &str, password: &str) -> Result<UserModel, AppError> {
        if self.repository.find_by_email(email).await?.is_some() {
            warn!("Registration attempted with an existing email");
            return Err(AppError::Conflict("email already registered".to_string()));
        }

        let hashed_password = self.hasher.hash_password(password).await?;
        let user = UserModel::new(email.to_string(), hashed_password);
        self.repository.add_user(&user).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// True when the email exists and the password matches
    #[instrument(skip(self, password))]
    pub async fn valid_login(&self, email: &str, password: &str) -> Result<bool, AppError> {
        match self.repository.find_by_email(email).await? {
            Some(user) => {
                self.hasher
                    .verify_password(password, &user.hashed_password)
                    .await
            }
            None => Ok(false),
        }
    }

    /// Returns the user for a correct email/password pair
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserModel, AppError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("no user found for this email".to_string()))?;

        if !self
            .hasher
            .verify_password(password, &user.hashed_password)
            .await?
        {
            warn!(user_id = %user.id, "Wrong password supplied");
            return Err(AppError::Unauthorized("wrong password".to_string()));
        }

        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<UserModel>, AppError> {
        self.repository.find_by_id(user_id).await
    }

    /// Issues and stores a fresh reset token for the given email
    #[instrument(skip(self))]
    pub async fn get_reset_password_token(&self, email: &str) -> Result<String, AppError> {
        let mut user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                warn!("Reset token requested for an unknown email");
                AppError::Forbidden("unknown email".to_string())
            })?;

        let reset_token = Uuid::new_v4().to_string();
        user.reset_token = Some(reset_token.clone());
        self.repository.update_user(&user).await?;

        info!(user_id = %user.id, "Reset token issued");
        Ok(reset_token)
    }

    /// Replaces the password of the user holding `reset_token`, consuming the token
    ///
    /// The token only counts when it was issued to `email`.
    #[instrument(skip(self, reset_token, new_password))]
    pub async fn update_password(
        &self,
        email: &str,
        reset_token: &str,
        new_password: &str,
    ) -> Result<UserModel, AppError> {
        let mut user = self
            .repository
            .find_by_reset_token(reset_token)
            .await?
            .filter(|user| user.email == email)
            .ok_or_else(|| {
                warn!("Password update with an invalid reset token");
                AppError::Forbidden("Invalid reset token".to_string())
            })?;

        user.hashed_password = self.hasher.hash_password(new_password).await?;
        user.reset_token = None;
        self.repository.update_user(&user).await?;

        info!(user_id = %user.id, "Password updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::password::Argon2PasswordHasher;
    use crate::user::repository::InMemoryUserRepository;
    use argon2::Params;

    fn service() -> UserService {
        UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2PasswordHasher::with_params(
                Params::new(8, 1, 1, None).unwrap(),
            )),
        )
    }

    #[tokio::test]
    async fn test_register_user_hashes_password() {
        let service = service();

        let user = service.register_user("bob@hbtn.io", "mySuperPwd").await.unwrap();

        assert_eq!(user.email, "bob@hbtn.io");
        assert_ne!(user.hashed_password, "mySuperPwd");
        assert!(user.reset_token.is_none());
        assert_eq!(service.get_user(&user.id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = service();
        service.register_user("bob@hbtn.io", "pwd").await.unwrap();

        let result = service.register_user("bob@hbtn.io", "other").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_valid_login() {
        let service = service();
        service.register_user("bob@hbtn.io", "mySuperPwd").await.unwrap();

        assert!(service.valid_login("bob@hbtn.io", "mySuperPwd").await.unwrap());
        assert!(!service.valid_login("bob@hbtn.io", "nope").await.unwrap());
        assert!(!service.valid_login("unknown@hbtn.io", "mySuperPwd").await.unwrap());
    }

    #[tokio::test]
    async fn test_authenticate_errors() {
        let service = service();
        service.register_user("bob@hbtn.io", "mySuperPwd").await.unwrap();

        assert!(matches!(
            service.authenticate("unknown@hbtn.io", "mySuperPwd").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.authenticate("bob@hbtn.io", "nope").await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_reset_password_flow() {
        let service = service();
        service.register_user("bob@hbtn.io", "oldPwd").await.unwrap();

        let token = service.get_reset_password_token("bob@hbtn.io").await.unwrap();
        let user = service
            .update_password("bob@hbtn.io", &token, "newPwd")
            .await
            .unwrap();

        assert!(user.reset_token.is_none());
        assert!(service.valid_login("bob@hbtn.io", "newPwd").await.unwrap());
        assert!(!service.valid_login("bob@hbtn.io", "oldPwd").await.unwrap());

        // Tokens are single use
        assert!(matches!(
            service.update_password("bob@hbtn.io", &token, "again").await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_reset_token_for_unknown_email() {
        let result = service().get_reset_password_token("ghost@hbtn.io").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_reset_token_is_bound_to_its_email() {
        let service = service();
        service.register_user("bob@hbtn.io", "bobPwd").await.unwrap();
        service.register_user("alice@hbtn.io", "alicePwd").await.unwrap();

        let token = service.get_reset_password_token("bob@hbtn.io").await.unwrap();

        assert!(matches!(
            service
                .update_password("alice@hbtn.io", &token, "stolen")
                .await,
            Err(AppError::Forbidden(_))
        ));
        assert!(service.valid_login("bob@hbtn.io", "bobPwd").await.unwrap());
        assert!(service.valid_login("alice@hbtn.io", "alicePwd").await.unwrap());

        // A mismatched attempt leaves the token usable by its owner
        service
            .update_password("bob@hbtn.io", &token, "newPwd")
            .await
            .unwrap();
        assert!(service.valid_login("bob@hbtn.io", "newPwd").await.unwrap());
    }
}
