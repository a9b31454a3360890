use axum::{
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::session;
use crate::shared::AppState;
use crate::user;

/// Builds the full HTTP surface with the session gate in front of every route
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/status", get(status))
        .route("/register", post(user::register))
        .route("/users", post(user::register))
        .route("/login", post(session::login))
        .route("/auth/login", post(session::login))
        .route("/auth/logout", get(session::logout))
        .route("/logout", delete(session::logout))
        .route("/sessions", post(session::login).delete(session::logout))
        .route("/api/v1/auth_session/login", post(session::login))
        .route("/api/v1/auth_session/logout", delete(session::logout))
        .route("/profile", get(user::profile))
        .route(
            "/reset_password",
            post(user::get_reset_password_token).put(user::update_password),
        )
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            session::require_session,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn home() -> Json<Value> {
    Json(json!({ "message": "Bienvenue" }))
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
