/// Integration tests for the credential & token service
///
/// These run against an in-memory SQLite database with the real schema,
/// real Argon2id hashing, and real token signing.
use chrono::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use tasktrack_shared::auth::credentials::{authenticate, validate, AuthError};
use tasktrack_shared::auth::password::hash_password;
use tasktrack_shared::db::migrations::run_migrations;
use tasktrack_shared::models::user::{CreateUser, User};

const SECRET: &str = "integration-test-secret-at-least-32-bytes";

async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    run_migrations(&pool).await.unwrap();
    pool
}

async fn seed_user(pool: &SqlitePool, email: &str, password: &str) -> User {
    User::create(
        pool,
        CreateUser {
            email: email.to_string(),
            name: "Test User".to_string(),
            password_hash: hash_password(password).unwrap(),
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_authenticate_and_validate_round_trip() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "admin@taskmanager.com", "Admin1234!").await;

    let session = authenticate(
        &pool,
        SECRET,
        Duration::hours(24),
        "admin@taskmanager.com",
        "Admin1234!",
    )
    .await
    .expect("Correct credentials should authenticate");

    // Public profile only, never the hash
    assert_eq!(session.user.id, user.id);
    assert_eq!(session.user.email, "admin@taskmanager.com");
    assert_eq!(session.user.name, "Test User");

    let resolved = validate(&session.access_token, SECRET).expect("Token should validate");
    assert_eq!(resolved, user.id);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let pool = test_pool().await;
    seed_user(&pool, "admin@taskmanager.com", "Admin1234!").await;

    let wrong_password = authenticate(
        &pool,
        SECRET,
        Duration::hours(24),
        "admin@taskmanager.com",
        "not-the-password",
    )
    .await
    .unwrap_err();

    let unknown_email = authenticate(
        &pool,
        SECRET,
        Duration::hours(24),
        "nobody@taskmanager.com",
        "Admin1234!",
    )
    .await
    .unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    // Identical user-facing rendering for both failure paths
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_email_match_is_exact() {
    let pool = test_pool().await;
    seed_user(&pool, "Maria@taskmanager.com", "Maria1234!").await;

    // Different casing is a different (unknown) email
    let result = authenticate(
        &pool,
        SECRET,
        Duration::hours(24),
        "maria@taskmanager.com",
        "Maria1234!",
    )
    .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_expired_token_fails_validation() {
    let pool = test_pool().await;
    seed_user(&pool, "admin@taskmanager.com", "Admin1234!").await;

    // A token issued already past its expiry window
    let session = authenticate(
        &pool,
        SECRET,
        Duration::seconds(-60),
        "admin@taskmanager.com",
        "Admin1234!",
    )
    .await
    .unwrap();

    let result = validate(&session.access_token, SECRET);
    assert!(matches!(result, Err(AuthError::TokenExpired)));
}

#[tokio::test]
async fn test_token_from_different_secret_is_invalid() {
    let pool = test_pool().await;
    seed_user(&pool, "admin@taskmanager.com", "Admin1234!").await;

    let session = authenticate(
        &pool,
        SECRET,
        Duration::hours(24),
        "admin@taskmanager.com",
        "Admin1234!",
    )
    .await
    .unwrap();

    // Rotating the signing secret invalidates every outstanding token
    let result = validate(&session.access_token, "a-rotated-secret-also-32-bytes-long!!");
    assert!(matches!(result, Err(AuthError::InvalidToken)));
}

#[tokio::test]
async fn test_tampered_token_is_invalid() {
    let pool = test_pool().await;
    seed_user(&pool, "admin@taskmanager.com", "Admin1234!").await;

    let session = authenticate(
        &pool,
        SECRET,
        Duration::hours(24),
        "admin@taskmanager.com",
        "Admin1234!",
    )
    .await
    .unwrap();

    let mut tampered = session.access_token.clone();
    let flipped = if tampered.pop() == Some('A') { 'B' } else { 'A' };
    tampered.push(flipped);

    let result = validate(&tampered, SECRET);
    assert!(matches!(result, Err(AuthError::InvalidToken)));
}
