use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the users table
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct UserModel {
    pub id: String,
    pub email: String,
    pub hashed_password: String, // PHC string
    pub reset_token: Option<String>,
}

impl UserModel {
    /// Creates a user with a generated id and no pending reset token
    pub fn new(email: String, hashed_password: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            hashed_password,
            reset_token: None,
        }
    }
}
