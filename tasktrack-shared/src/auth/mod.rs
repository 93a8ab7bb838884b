/// Authentication utilities
///
/// This module provides the credential and token primitives for TaskTrack:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Signed access token generation and validation
/// - [`credentials`]: The credential service (email/password → token, token → identity)
/// - [`middleware`]: Bearer token extraction and per-request auth context
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Access Tokens**: HS256 signing with a configurable expiry window
/// - **Constant-time Comparison**: Password verification uses constant-time operations
/// - **Uniform Failures**: Unknown email and wrong password are indistinguishable
pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod password;
