/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - In-memory test database with the real schema
/// - Test user creation with real password hashes
/// - Access token generation
/// - Request helpers for driving the router
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tower::Service as _;

use tasktrack_api::app::{build_router, AppState};
use tasktrack_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use tasktrack_shared::auth::jwt::{create_token, Claims};
use tasktrack_shared::auth::password::hash_password;
use tasktrack_shared::db::migrations::run_migrations;
use tasktrack_shared::models::user::{CreateUser, User};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database and one
    /// seeded user (`admin@taskmanager.com` / `Admin1234!`)
    pub async fn new() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
                access_ttl_hours: 1,
            },
        };

        let user = create_test_user(&db, "admin@taskmanager.com", "Admin1234!", "Admin User").await?;
        let token = token_for(&user);

        let app = build_router(AppState::new(db.clone(), config));

        Ok(Self {
            db,
            app,
            user,
            token,
        })
    }

    /// Authorization header value for the context's seeded user
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Creates a user with a real Argon2id hash
pub async fn create_test_user(
    db: &SqlitePool,
    email: &str,
    password: &str,
    name: &str,
) -> anyhow::Result<User> {
    let user = User::create(
        db,
        CreateUser {
            email: email.to_string(),
            name: name.to_string(),
            password_hash: hash_password(password)?,
        },
    )
    .await?;

    Ok(user)
}

/// Issues a short-lived access token for a user
pub fn token_for(user: &User) -> String {
    let claims = Claims::new(user.id, chrono::Duration::hours(1));
    create_token(&claims, TEST_SECRET).expect("Token creation should succeed")
}

/// Sends a request through the router and returns status plus parsed body
///
/// The body is `Value::Null` for empty responses (e.g. 204).
pub async fn send(
    ctx: &TestContext,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = ctx.app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
