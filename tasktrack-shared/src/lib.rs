//! # TaskTrack Shared Library
//!
//! This crate contains the types, database layer, and business logic shared
//! between the TaskTrack API server and its companion binaries.
//!
//! ## Module Organization
//!
//! - `models`: Database models and the narrow repository operations over them
//! - `auth`: Password hashing, token issuance/validation, and the credential service
//! - `tasks`: Ownership-enforcing access layer over task persistence
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;
pub mod tasks;

/// Current version of the TaskTrack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
