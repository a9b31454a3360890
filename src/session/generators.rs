use uuid::Uuid;

/// Source of session identifiers
pub trait SessionIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UUID v4 identifiers, drawn from the OS random number generator
pub struct UuidSessionIdGenerator;

impl UuidSessionIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UuidSessionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionIdGenerator for UuidSessionIdGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
