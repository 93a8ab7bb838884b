/// Database models for TaskTrack
///
/// This module contains the row types and the narrow repository operations
/// over them. Ownership and validation policy lives one level up in
/// [`crate::tasks`]; nothing here checks who is asking.
///
/// # Models
///
/// - `user`: User accounts (provisioned by the seed binary, read by the credential service)
/// - `task`: Personal tasks with status, priority, and an owner reference
pub mod task;
pub mod user;
