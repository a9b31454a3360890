use chrono::Duration;
use thiserror::Error;
use tracing::warn;

use crate::session::registry::SessionConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_SESSION_NAME: &str = "session_id";
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300;

/// Paths reachable without a session cookie
pub const DEFAULT_EXCLUDED_PATHS: &[&str] = &[
    "/",
    "/status",
    "/register",
    "/users",
    "/login",
    "/auth/login",
    "/auth/logout",
    "/logout",
    "/sessions",
    "/api/v1/auth_session/login",
    "/api/v1/auth_session/logout",
    "/reset_password",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Cookie carrying the session id
    pub session_name: String,
    /// `None` disables expiry
    pub session_duration: Option<Duration>,
    pub cleanup_interval: std::time::Duration,
    /// Postgres connection string; in-memory stores are used when absent
    pub database_url: Option<String>,
    pub excluded_paths: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            session_name: DEFAULT_SESSION_NAME.to_string(),
            session_duration: None,
            cleanup_interval: std::time::Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            database_url: None,
            excluded_paths: DEFAULT_EXCLUDED_PATHS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("API_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT",
                value: raw,
            })?,
            None => defaults.port,
        };

        let cleanup_interval = match lookup("SESSION_CLEANUP_INTERVAL") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => std::time::Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "SESSION_CLEANUP_INTERVAL",
                        value: raw,
                    })
                }
            },
            None => defaults.cleanup_interval,
        };

        Ok(Self {
            host: lookup("API_HOST").unwrap_or(defaults.host),
            port,
            session_name: lookup("SESSION_NAME")
                .filter(|name| !name.is_empty())
                .unwrap_or(defaults.session_name),
            session_duration: parse_session_duration(lookup("SESSION_DURATION")),
            cleanup_interval,
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            excluded_paths: defaults.excluded_paths,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            duration: self.session_duration,
        }
    }
}

/// Zero, negative and unparsable durations all mean "no expiry"
fn parse_session_duration(raw: Option<String>) -> Option<Duration> {
    let raw = raw?;
    match raw.trim().parse::<i64>() {
        Ok(secs) if secs > 0 => Some(Duration::seconds(secs)),
        Ok(_) => None,
        Err(_) => {
            warn!(value = %raw, "Ignoring unparsable SESSION_DURATION, sessions will not expire");
            None
        }
    }
}
