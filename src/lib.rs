// Library crate for the session authentication service
// This file exposes the public API for integration tests

pub mod config;
pub mod routes;
pub mod session;
pub mod shared;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use routes::build_router;
pub use session::{
    repository::{InMemorySessionRepository, PostgresSessionRepository, SessionRepository},
    SessionConfig, SessionRegistry,
};
pub use shared::{AppError, AppState};
pub use user::{
    password::{Argon2PasswordHasher, CredentialsHasher},
    repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository},
};
