use serde::{Deserialize, Serialize};

/// Form body for POST /register
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Form body for POST /reset_password
#[derive(Debug, Default, Deserialize)]
pub struct ResetTokenForm {
    pub email: Option<String>,
}

/// Form body for PUT /reset_password
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePasswordForm {
    pub email: Option<String>,
    pub reset_token: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserMessageResponse {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ResetTokenResponse {
    pub email: String,
    pub reset_token: String,
}

/// Treats an empty form field the same as a missing one
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
