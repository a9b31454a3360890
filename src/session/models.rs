use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the user_sessions table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct SessionModel {
    pub id: String,
    pub user_id: String, // Non-owning reference into the user store
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>, // None means the session never expires
}

impl SessionModel {
    /// Creates a session starting now, expiring after `duration` if one is given
    pub fn new(id: String, user_id: String, duration: Option<Duration>) -> Self {
        let now = Utc::now();

        Self {
            id,
            user_id,
            created_at: now,
            expires_at: duration.map(|d| now + d),
        }
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => false,
        }
    }
}
