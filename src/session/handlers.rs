use axum::{extract::State, Form, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use super::types::{LoginForm, LoginResponse};
use crate::shared::{AppError, AppState};

/// HTTP handler for logging in with email and password
///
/// POST /login, POST /auth/login, POST /sessions, POST /api/v1/auth_session/login
/// Sets the session cookie and returns the user's email
#[instrument(name = "login", skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Option<Form<LoginForm>>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    // A request without a form body is treated as an empty form
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let email = form
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("email missing".to_string()))?;
    let password = form
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("password missing".to_string()))?;

    let user = state.user_service().authenticate(&email, &password).await?;
    let session_id = state.session_registry.create(&user.id).await?;

    let cookie = Cookie::build((state.config.session_name.clone(), session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    info!(user_id = %user.id, "User logged in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            email: user.email,
            message: "logged in".to_string(),
        }),
    ))
}

/// HTTP handler for logging out
///
/// GET /auth/logout, DELETE /logout, DELETE /sessions, DELETE /api/v1/auth_session/logout
/// Revokes the caller's session; an unknown session is a 404
#[instrument(name = "logout", skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let session_name = state.config.session_name.clone();
    let session_id = jar
        .get(&session_name)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| {
            warn!("Logout requested without a session cookie");
            AppError::Unauthenticated
        })?;

    state.session_registry.revoke(&session_id).await?;

    info!("User logged out");

    let removal = Cookie::build((session_name, "")).path("/");
    Ok((jar.remove(removal), Json(json!({}))))
}
