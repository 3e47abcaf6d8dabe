use std::sync::Arc;

use acquisitions_service::config::Config;
use acquisitions_service::domain::user::ports::UserServicePort;
use acquisitions_service::domain::user::service::UserService;
use acquisitions_service::inbound::http::cookies::CookieWriter;
use acquisitions_service::inbound::http::router::create_router;
use acquisitions_service::outbound::repositories::InMemoryUserRepository;
use acquisitions_service::outbound::repositories::PostgresUserRepository;
use auth::TokenIssuer;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "acquisitions_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "acquisitions-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        host = %config.server.host,
        http_port = config.server.http_port,
        database = config.database.url.is_some(),
        jwt_expiration_hours = config.jwt.expiration_hours,
        cookie_secure = config.cookie.secure,
        "Configuration loaded"
    );

    let user_service: Arc<dyn UserServicePort> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
            Arc::new(UserService::new(user_repository))
        }
        None => {
            tracing::warn!("No database.url configured, users are kept in memory");
            let user_repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(UserService::new(user_repository))
        }
    };

    let token_ttl = chrono::Duration::hours(config.jwt.expiration_hours);
    let token_issuer = Arc::new(TokenIssuer::with_ttl(config.jwt.secret.as_bytes(), token_ttl));
    let cookie_writer = CookieWriter::new(config.cookie.secure, token_ttl);

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, token_issuer, cookie_writer);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
