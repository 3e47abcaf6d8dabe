#![allow(dead_code)]

use std::sync::Arc;

use acquisitions_service::domain::user::models::EmailAddress;
use acquisitions_service::domain::user::models::User;
use acquisitions_service::domain::user::ports::UserRepository;
use acquisitions_service::domain::user::service::UserService;
use acquisitions_service::inbound::http::cookies::CookieWriter;
use acquisitions_service::inbound::http::router::create_router;
use acquisitions_service::outbound::repositories::InMemoryUserRepository;
use acquisitions_service::user::errors::UserError;
use async_trait::async_trait;
use auth::TokenIssuer;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp<R = InMemoryUserRepository> {
    pub address: String,
    pub port: u16,
    pub users: Arc<R>,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

impl TestApp<InMemoryUserRepository> {
    /// Spawn the application backed by the in-process store
    pub async fn spawn() -> Self {
        Self::spawn_with_repository(Arc::new(InMemoryUserRepository::new())).await
    }
}

impl<R: UserRepository> TestApp<R> {
    /// Spawn the application in a background task on top of `users`
    pub async fn spawn_with_repository(users: Arc<R>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_service = Arc::new(UserService::new(Arc::clone(&users)));

        let token_issuer = Arc::new(TokenIssuer::new(TEST_SECRET));
        let cookie_writer = CookieWriter::new(true, token_issuer.ttl());

        let router = create_router(user_service, token_issuer, cookie_writer);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            users,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            token_issuer: TokenIssuer::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// POST a JSON body to the signup route.
    pub async fn sign_up(&self, body: &serde_json::Value) -> reqwest::Response {
        self.post("/api/auth/sign-up")
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Store whose every call fails with a database error carrying `detail`.
pub struct FailingUserRepository {
    pub detail: String,
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn create(&self, _user: User) -> Result<User, UserError> {
        Err(UserError::DatabaseError(self.detail.clone()))
    }

    async fn find_by_email(&self, _email: &EmailAddress) -> Result<Option<User>, UserError> {
        Err(UserError::DatabaseError(self.detail.clone()))
    }
}

/// Test database helper
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    postgres_url: String,
}

impl TestDb {
    /// Create a fresh database with migrations applied.
    ///
    /// Returns `None` when `DATABASE_URL` is not set, so PostgreSQL tests
    /// are skipped on machines without a server.
    pub async fn new() -> Option<Self> {
        let Ok(postgres_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL is not set, skipping PostgreSQL test");
            return None;
        };

        let db_name = format!(
            "test_acquisitions_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            postgres_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let postgres_url = self.postgres_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&postgres_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}

/// Raw `Set-Cookie` header for `name`, if the response carries one.
pub fn set_cookie(response: &reqwest::Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&prefix))
        .map(str::to_string)
}

/// Value part of a `Set-Cookie` header.
pub fn cookie_value(header: &str) -> &str {
    header
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value)
        .unwrap_or_default()
}
