/// Access token generation and validation
///
/// Tokens are signed JWTs using HS256 (HMAC-SHA256). A token is a
/// self-contained credential carrying the owner's user id and an expiry
/// instant; validity is determined entirely by the token content plus the
/// current clock. There is no refresh mechanism and no server-side
/// revocation; a token stays valid until its natural expiry.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: Configurable (default 24 hours), checked with zero leeway
/// - **Validation**: Signature, expiration, not-before, and issuer checks
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use tasktrack_shared::auth::jwt::{create_token, validate_token, Claims};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(42, Duration::hours(24));
/// let token = create_token(&claims, "your-secret-key-at-least-32-bytes")?;
///
/// let validated = validate_token(&token, "your-secret-key-at-least-32-bytes")?;
/// assert_eq!(validated.sub, 42);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer claim embedded in every token
const ISSUER: &str = "tasktrack";

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token is malformed, tampered with, or signed with a different secret
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// JWT claims structure
///
/// # Claims
///
/// - `sub`: Subject (numeric user id)
/// - `iss`: Issuer (always "tasktrack")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: i64,

    /// Issuer - always "tasktrack"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Creates claims for a user with the given time-to-live
    ///
    /// # Example
    ///
    /// ```
    /// use tasktrack_shared::auth::jwt::Claims;
    /// use chrono::Duration;
    ///
    /// let claims = Claims::new(7, Duration::hours(24));
    /// assert_eq!(claims.sub, 7);
    /// assert!(!claims.is_expired());
    /// ```
    pub fn new(user_id: i64, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Checks if the token has expired
    ///
    /// Same boundary as validation: a token at exactly its expiry instant
    /// is still valid.
    pub fn is_expired(&self) -> bool {
        self.expired_at(Utc::now().timestamp())
    }

    fn expired_at(&self, now: i64) -> bool {
        now > self.exp
    }
}

/// Creates a signed token from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
///
/// # Security
///
/// The secret should be at least 32 bytes, randomly generated, and stored
/// outside the repository (environment variable or secret manager).
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies:
/// - Signature is valid for `secret`
/// - Token hasn't expired (no leeway)
/// - Issuer is "tasktrack"
/// - Token is not used before its nbf time
///
/// # Errors
///
/// - `JwtError::Expired` if the signature is valid but the token is past expiry
/// - `JwtError::Invalid` for any other failure (tampering, wrong secret, malformed)
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    // The expiry boundary must be exact, not fuzzy
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Invalid(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
