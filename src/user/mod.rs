// Public API - what other modules can use
pub use handlers::{get_reset_password_token, profile, register, update_password};
pub use service::UserService;

// Internal modules
mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
mod types;
