use session_auth::{
    build_router, session::start_cleanup_task, AppConfig, AppState, Argon2PasswordHasher,
    InMemorySessionRepository, InMemoryUserRepository, PostgresSessionRepository,
    PostgresUserRepository, SessionRegistry, SessionRepository, UserRepository,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Stores = (
    Arc<dyn SessionRepository + Send + Sync>,
    Arc<dyn UserRepository + Send + Sync>,
);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting session auth server");

    let config = AppConfig::from_env()?;
    let (session_repository, user_repository) = build_stores(&config).await?;

    let session_registry = Arc::new(SessionRegistry::new(
        session_repository,
        config.session_config(),
    ));

    tokio::spawn(start_cleanup_task(
        Arc::clone(&session_registry),
        config.cleanup_interval,
    ));

    let bind_address = config.bind_address();
    let app_state = AppState::new(
        session_registry,
        user_repository,
        Arc::new(Argon2PasswordHasher::default()),
        config,
    );
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server running on http://{}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Postgres when DATABASE_URL is set, in-memory stores otherwise
async fn build_stores(config: &AppConfig) -> Result<Stores, Box<dyn std::error::Error>> {
    match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::PgPool::connect(database_url).await?;
            sqlx::migrate!().run(&pool).await?;
            info!("Using PostgreSQL session and user stores");

            Ok((
                Arc::new(PostgresSessionRepository::new(pool.clone())),
                Arc::new(PostgresUserRepository::new(pool)),
            ))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory session and user stores");

            Ok((
                Arc::new(InMemorySessionRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
            ))
        }
    }
}
