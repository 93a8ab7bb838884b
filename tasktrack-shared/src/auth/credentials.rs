/// Credential & token service
///
/// This is the authentication boundary of the system. It verifies a
/// submitted email/password pair against the stored hash and issues a
/// signed, time-limited access token; later it resolves such a token back
/// to a user identity on every protected request.
///
/// Failure behavior is deliberately uniform: an unknown email and a wrong
/// password both produce the identical [`AuthError::InvalidCredentials`],
/// so the service never reveals whether an email exists.
///
/// # Example
///
/// ```no_run
/// use tasktrack_shared::auth::credentials::{authenticate, validate};
/// use chrono::Duration;
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let session = authenticate(
///     &pool,
///     "jwt-secret-at-least-32-bytes-long!!",
///     Duration::hours(24),
///     "admin@taskmanager.com",
///     "Admin1234!",
/// )
/// .await?;
///
/// let user_id = validate(&session.access_token, "jwt-secret-at-least-32-bytes-long!!")?;
/// assert_eq!(user_id, session.user.id);
/// # Ok(())
/// # }
/// ```
use chrono::Duration;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::jwt::{self, Claims, JwtError};
use super::password::{self, PasswordError};
use crate::models::user::{PublicUser, User};

/// Error type for the credential service
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Email unknown or password wrong; the two cases are indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Token signature doesn't verify or the token is malformed
    #[error("Invalid token")]
    InvalidToken,

    /// Token signature is valid but the token is past its expiry
    #[error("Token has expired")]
    TokenExpired,

    /// Stored hash could not be processed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token could not be created
    #[error(transparent)]
    Token(#[from] JwtError),

    /// Storage failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Signed access token for subsequent requests
    pub access_token: String,

    /// Public profile of the authenticated user (never the password hash)
    pub user: PublicUser,
}

/// Authenticates an email/password pair and issues an access token
///
/// Looks the user up by exact email match and verifies the password against
/// the stored Argon2id hash. On success, returns a signed token encoding the
/// user's id together with the public profile. No state is mutated.
///
/// # Errors
///
/// - `AuthError::InvalidCredentials` if the email is unknown or the
///   password doesn't match (same error for both)
/// - `AuthError::Database` on storage failure
pub async fn authenticate(
    pool: &SqlitePool,
    secret: &str,
    token_ttl: Duration,
    email: &str,
    password: &str,
) -> Result<AuthSession, AuthError> {
    let user = match User::find_by_email(pool, email).await? {
        Some(user) => user,
        None => {
            tracing::debug!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        }
    };

    let valid = password::verify_password(password, &user.password_hash)?;
    if !valid {
        tracing::debug!(user_id = user.id, "Login attempt with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let claims = Claims::new(user.id, token_ttl);
    let access_token = jwt::create_token(&claims, secret)?;

    tracing::info!(user_id = user.id, "User authenticated");

    Ok(AuthSession {
        access_token,
        user: user.to_public(),
    })
}

/// Validates an access token and resolves it to a user id
///
/// Stateless: validity is determined entirely by the token content plus the
/// current clock. Every protected operation must pass through this check
/// before touching user data.
///
/// # Errors
///
/// - `AuthError::InvalidToken` if the signature doesn't verify or the
///   token is malformed
/// - `AuthError::TokenExpired` if the signature is valid but past expiry
pub fn validate(token: &str, secret: &str) -> Result<i64, AuthError> {
    match jwt::validate_token(token, secret) {
        Ok(claims) => Ok(claims.sub),
        Err(JwtError::Expired) => Err(AuthError::TokenExpired),
        Err(_) => Err(AuthError::InvalidToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_garbage() {
        let result = validate("definitely-not-a-token", "secret-key-at-least-32-bytes-long!!");
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_validate_maps_expiry() {
        let secret = "secret-key-at-least-32-bytes-long!!";
        let claims = Claims::new(9, Duration::seconds(-60));
        let token = jwt::create_token(&claims, secret).unwrap();

        assert!(matches!(validate(&token, secret), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_validate_resolves_user_id() {
        let secret = "secret-key-at-least-32-bytes-long!!";
        let claims = Claims::new(9, Duration::hours(1));
        let token = jwt::create_token(&claims, secret).unwrap();

        assert_eq!(validate(&token, secret).unwrap(), 9);
    }

    // Database-backed authenticate() tests live in tests/auth_flow_tests.rs
}
