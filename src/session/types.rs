use serde::{Deserialize, Serialize};

use crate::user::models::UserModel;

/// Authenticated user, attached to request extensions by the session gate
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserModel);

/// Form body for the login endpoints
///
/// Fields are optional so a missing one can be reported by name.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response structure for a successful login
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub email: String,
    pub message: String,
}
