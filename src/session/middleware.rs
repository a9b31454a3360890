use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, instrument, warn};

use super::types::CurrentUser;
use crate::shared::{AppError, AppState};

/// Whether `path` needs a session, given the exempt paths
///
/// Trailing slashes are ignored on both sides; an entry ending in `*`
/// exempts every path starting with what precedes the star.
pub fn auth_required(path: &str, excluded_paths: &[String]) -> bool {
    if excluded_paths.is_empty() {
        return true;
    }

    let normalized = path.trim_end_matches('/');
    !excluded_paths
        .iter()
        .any(|excluded| match excluded.strip_suffix('*') {
            Some(prefix) => normalized.starts_with(prefix),
            None => normalized == excluded.trim_end_matches('/'),
        })
}

/// Session gate - resolves the session cookie and adds CurrentUser to the request.
/// Usage: .layer(middleware::from_fn_with_state(app_state.clone(), session::require_session))
/// Handlers can then extract Extension(current_user): Extension<CurrentUser>.
#[instrument(skip(state, req, next), fields(path = %req.uri().path()))]
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !auth_required(req.uri().path(), &state.config.excluded_paths) {
        return Ok(next.run(req).await);
    }

    let jar = CookieJar::from_headers(req.headers());
    let session_id = jar
        .get(&state.config.session_name)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| {
            warn!("Missing session cookie on protected path");
            AppError::Unauthenticated
        })?;

    let user_id = state
        .session_registry
        .resolve(&session_id)
        .await
        .map_err(|e| match e {
            AppError::SessionNotFound | AppError::SessionExpired => {
                warn!(error = %e, "Session cookie did not resolve");
                AppError::Unauthenticated
            }
            other => other,
        })?;

    let user = state
        .user_repository
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "Session refers to a user that no longer exists");
            AppError::Unauthenticated
        })?;

    debug!(user_id = %user.id, "Session resolved, adding current user to request");
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
