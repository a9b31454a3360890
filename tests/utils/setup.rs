#![allow(dead_code)] // Test utilities may not all be used in every test

use argon2::Params;
use axum::Router;
use chrono::Duration;
use std::sync::Arc;

use session_auth::{
    build_router, AppConfig, AppState, Argon2PasswordHasher, InMemorySessionRepository,
    InMemoryUserRepository, SessionConfig, SessionRegistry,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub state: AppState,
    pub session_repository: Arc<InMemorySessionRepository>,
    pub config: AppConfig,
}

pub struct TestSetupBuilder {
    config: AppConfig,
    users: Vec<(String, String)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            users: vec![],
        }
    }

    pub fn with_session_name(mut self, name: &str) -> Self {
        self.config.session_name = name.to_string();
        self
    }

    pub fn with_session_duration(mut self, duration: Duration) -> Self {
        self.config.session_duration = Some(duration);
        self
    }

    pub fn with_user(mut self, email: &str, password: &str) -> Self {
        self.users.push((email.to_string(), password.to_string()));
        self
    }

    pub async fn build(self) -> TestSetup {
        let session_repository = Arc::new(InMemorySessionRepository::new());
        let registry = SessionRegistry::new(
            session_repository.clone(),
            SessionConfig {
                duration: self.config.session_duration,
            },
        );

        // Minimum Argon2 cost keeps the suite fast
        let hasher = Argon2PasswordHasher::with_params(Params::new(8, 1, 1, None).unwrap());

        let state = AppState::new(
            Arc::new(registry),
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(hasher),
            self.config.clone(),
        );

        for (email, password) in &self.users {
            state
                .user_service()
                .register_user(email, password)
                .await
                .unwrap();
        }

        TestSetup {
            app: build_router(state.clone()),
            state,
            session_repository,
            config: self.config,
        }
    }
}
