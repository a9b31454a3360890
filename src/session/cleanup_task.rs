use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, instrument};

use super::registry::SessionRegistry;

/// Starts the background task that periodically drops expired sessions
#[instrument(skip(registry))]
pub async fn start_cleanup_task(registry: Arc<SessionRegistry>, cleanup_interval: Duration) {
    info!(
        cleanup_interval_secs = cleanup_interval.as_secs(),
        "Starting session cleanup background task"
    );

    let mut ticker = interval(cleanup_interval);

    loop {
        ticker.tick().await;
        run_cleanup(&registry).await;
    }
}

/// One sweep; failures are logged and never end the task
async fn run_cleanup(registry: &SessionRegistry) -> u64 {
    match registry.cleanup_expired().await {
        Ok(removed) => removed,
        Err(e) => {
            error!(error = %e, "Session cleanup task failed");
            0
        }
    }
}
