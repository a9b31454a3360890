use axum::{extract::State, Extension, Form, Json};
use tracing::{info, instrument};

use super::types::{
    required, ProfileResponse, RegisterForm, ResetTokenForm, ResetTokenResponse,
    UpdatePasswordForm, UserMessageResponse,
};
use crate::session::CurrentUser;
use crate::shared::{AppError, AppState};

/// HTTP handler for registering a user
///
/// POST /register, POST /users
#[instrument(name = "register", skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    form: Option<Form<RegisterForm>>,
) -> Result<Json<UserMessageResponse>, AppError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let (Some(email), Some(password)) = (required(form.email), required(form.password)) else {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let user = state.user_service().register_user(&email, &password).await?;

    Ok(Json(UserMessageResponse {
        email: user.email,
        message: "user created".to_string(),
    }))
}

/// HTTP handler returning the logged-in user
///
/// GET /profile (behind the session gate)
#[instrument(name = "profile", skip_all)]
pub async fn profile(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<ProfileResponse> {
    info!(user_id = %user.id, "Serving profile");

    Json(ProfileResponse {
        id: user.id,
        email: user.email,
    })
}

/// HTTP handler issuing a password reset token
///
/// POST /reset_password
#[instrument(name = "get_reset_password_token", skip(state, form))]
pub async fn get_reset_password_token(
    State(state): State<AppState>,
    form: Option<Form<ResetTokenForm>>,
) -> Result<Json<ResetTokenResponse>, AppError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let email = required(form.email)
        .ok_or_else(|| AppError::Forbidden("email is required".to_string()))?;

    let reset_token = state.user_service().get_reset_password_token(&email).await?;

    Ok(Json(ResetTokenResponse { email, reset_token }))
}

/// HTTP handler setting a new password from a reset token
///
/// PUT /reset_password
#[instrument(name = "update_password", skip(state, form))]
pub async fn update_password(
    State(state): State<AppState>,
    form: Option<Form<UpdatePasswordForm>>,
) -> Result<Json<UserMessageResponse>, AppError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let (Some(email), Some(reset_token), Some(new_password)) = (
        required(form.email),
        required(form.reset_token),
        required(form.new_password),
    ) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let user = state
        .user_service()
        .update_password(&email, &reset_token, &new_password)
        .await?;

    Ok(Json(UserMessageResponse {
        email: user.email,
        message: "Password updated".to_string(),
    }))
}
