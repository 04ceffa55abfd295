use std::sync::Arc;

use anyhow::anyhow;
use ats_service::config::Config;
use ats_service::domain::auth::service::AuthService;
use ats_service::domain::user::models::Role;
use ats_service::inbound::http::router::create_router;
use ats_service::inbound::http::router::AppState;
use ats_service::outbound::repositories::PostgresApplicationStore;
use ats_service::outbound::repositories::PostgresCandidateStore;
use ats_service::outbound::repositories::PostgresInterviewStore;
use ats_service::outbound::repositories::PostgresJobStore;
use ats_service::outbound::repositories::PostgresUserRepository;
use auth::TokenService;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ats_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "ats-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.access_token_ttl_minutes,
        default_role = %config.app.default_role,
        "Configuration loaded"
    );

    // A misconfigured default role fails startup; registration relies on it.
    let default_role = Role::parse(&config.app.default_role)
        .ok_or_else(|| anyhow!("Unknown default role: {}", config.app.default_role))?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_service = Arc::new(TokenService::new(
        config.jwt.secret.clone(),
        Duration::minutes(config.jwt.access_token_ttl_minutes),
    ));
    let users = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        Arc::clone(&token_service),
        default_role,
    ));

    let state = AppState {
        auth_service,
        token_service,
        users,
        jobs: Arc::new(PostgresJobStore::new(pg_pool.clone())),
        candidates: Arc::new(PostgresCandidateStore::new(pg_pool.clone())),
        applications: Arc::new(PostgresApplicationStore::new(pg_pool.clone())),
        interviews: Arc::new(PostgresInterviewStore::new(pg_pool)),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}
