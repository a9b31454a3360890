// Public API - what other modules can use
pub use cleanup_task::start_cleanup_task;
pub use handlers::{login, logout};
pub use middleware::{auth_required, require_session};
pub use registry::{SessionConfig, SessionRegistry};
pub use types::CurrentUser;

// Internal modules
mod cleanup_task;
pub mod generators;
mod handlers;
mod middleware;
pub mod models;
pub mod registry;
pub mod repository;
mod types;
