/// Authentication endpoint
///
/// # Endpoints
///
/// - `POST /login` - Verify credentials and issue an access token
use crate::{
    app::AppState,
    error::{validation_errors, ApiResult},
};
use axum::{extract::State, Json};
use serde::Deserialize;
use tasktrack_shared::auth::credentials::{self, AuthSession};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Login endpoint
///
/// Verifies the submitted email/password pair and returns a signed access
/// token plus the public user profile.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "email": "admin@taskmanager.com",
///   "password": "Admin1234!"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "access_token": "eyJ...",
///   "user": { "id": 1, "email": "admin@taskmanager.com", "name": "Admin User" }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Empty email or password
/// - `401 Unauthorized`: Invalid credentials; the body does not reveal
///   whether the email exists
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthSession>> {
    req.validate().map_err(validation_errors)?;

    let session = credentials::authenticate(
        &state.db,
        state.jwt_secret(),
        state.token_ttl(),
        &req.email,
        &req.password,
    )
    .await?;

    Ok(Json(session))
}
