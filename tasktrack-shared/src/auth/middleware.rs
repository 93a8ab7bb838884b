/// Authentication context and bearer token extraction
///
/// The API server validates the `Authorization: Bearer <token>` header on
/// every protected request and injects an [`AuthContext`] into the request
/// extensions. Handlers receive the authenticated identity explicitly and
/// pass it into every task-layer call; there is no ambient "current user".
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use tasktrack_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```
use axum::http::{header, HeaderMap};

/// Authentication context added to request extensions
///
/// Present on a request only after token validation has succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated user id (subject of the validated token)
    pub user_id: i64,
}

impl AuthContext {
    /// Creates an auth context for a validated user id
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

/// Extracts the bearer token from a request's headers
///
/// Returns `None` if the `Authorization` header is missing, is not valid
/// UTF-8, or does not use the `Bearer` scheme.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_present() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );

        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_auth_context() {
        let ctx = AuthContext::new(42);
        assert_eq!(ctx.user_id, 42);
    }
}
