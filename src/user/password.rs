use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use async_trait::async_trait;

use crate::shared::AppError;

/// Hashes and verifies user passwords
#[async_trait]
pub trait CredentialsHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AppError>;
    async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, AppError>;
}

/// Argon2id hasher producing PHC strings; work runs on the blocking pool
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher {
    hasher: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn with_params(params: Params) -> Self {
        Self {
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

#[async_trait]
impl CredentialsHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            hasher
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|_| AppError::PasswordHash)
        })
        .await
        .map_err(|_| AppError::Internal)?
    }

    async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let hashed = hashed.to_owned();
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&hashed).map_err(|_| AppError::PasswordHash)?;
            Ok(hasher
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await
        .map_err(|_| AppError::Internal)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWORD: &str = "mySuperPwd";

    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(Params::new(8, 1, 1, None).unwrap())
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = hasher();

        let hash = hasher.hash_password(PASSWORD).await.unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, PASSWORD);
        assert!(hasher.verify_password(PASSWORD, &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_wrong_password() {
        let hasher = hasher();

        let hash = hasher.hash_password(PASSWORD).await.unwrap();
        assert!(!hasher.verify_password("not-it", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_gets_different_salts() {
        let hasher = hasher();

        let first = hasher.hash_password(PASSWORD).await.unwrap();
        let second = hasher.hash_password(PASSWORD).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_verify_invalid_hash_format() {
        let result = hasher().verify_password(PASSWORD, "invalid").await;
        assert!(matches!(result, Err(AppError::PasswordHash)));
    }

    #[tokio::test]
    async fn test_default_hasher_verifies_lightweight_hash() {
        // PHC strings carry their own parameters
        let hash = hasher().hash_password(PASSWORD).await.unwrap();
        assert!(Argon2PasswordHasher::default()
            .verify_password(PASSWORD, &hash)
            .await
            .unwrap());
    }
}
