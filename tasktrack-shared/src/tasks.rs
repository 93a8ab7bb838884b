/// Task access-control layer
///
/// Every operation here takes an explicit `owner_id` (the identity
/// resolved from a validated access token) and enforces that a user can
/// only ever observe or mutate tasks they created. Nothing below this layer
/// checks ownership; nothing above it touches the repository directly.
///
/// # Error semantics
///
/// - [`TaskError::NotFound`]: no task with that id exists anywhere
/// - [`TaskError::Forbidden`]: the task exists but belongs to someone else
///
/// Internally the two are distinct kinds; user-facing messaging must not
/// elaborate beyond the generic status.
///
/// # Example
///
/// ```no_run
/// use tasktrack_shared::tasks::{self, CreateTaskInput};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool, user_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// let task = tasks::create(&pool, user_id, CreateTaskInput {
///     title: "Write release notes".to_string(),
///     ..Default::default()
/// }).await?;
///
/// let mine = tasks::list(&pool, user_id, None).await?;
/// assert!(mine.iter().any(|t| t.id == task.id));
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::models::task::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTask};

/// Maximum title length in characters
const TITLE_MAX_CHARS: usize = 200;

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// No task with that id exists
    #[error("Task not found")]
    NotFound,

    /// The task exists but is owned by a different user
    #[error("Access denied")]
    Forbidden,

    /// A field failed validation
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// Field that failed validation
        field: &'static str,
        /// Human-readable reason
        message: String,
    },

    /// Storage failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Fields accepted when creating a task
///
/// There is deliberately no owner field here: the owner is always the
/// authenticated caller, whatever the request body claimed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskInput {
    /// Title (required, 1-200 characters)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Status (defaults to pending)
    pub status: Option<TaskStatus>,

    /// Priority (defaults to medium)
    pub priority: Option<TaskPriority>,

    /// Optional due date
    pub due_date: Option<chrono::NaiveDate>,
}

/// Fields accepted when updating a task: present fields replace, absent
/// fields retain their prior values, and an explicit null clears a
/// nullable field
pub type UpdateTaskInput = UpdateTask;

fn validate_title(title: &str) -> Result<(), TaskError> {
    if title.is_empty() {
        return Err(TaskError::Validation {
            field: "title",
            message: "Title must not be empty".to_string(),
        });
    }

    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(TaskError::Validation {
            field: "title",
            message: format!("Title must be at most {} characters", TITLE_MAX_CHARS),
        });
    }

    Ok(())
}

/// Loads a task and checks the caller owns it
///
/// Existence is checked before ownership, so a missing task is `NotFound`
/// while someone else's task is `Forbidden`.
async fn find_owned(pool: &SqlitePool, task_id: i64, owner_id: i64) -> Result<Task, TaskError> {
    let task = Task::find_by_id(pool, task_id)
        .await?
        .ok_or(TaskError::NotFound)?;

    if task.owner_id != owner_id {
        tracing::warn!(
            task_id,
            owner_id = task.owner_id,
            requester_id = owner_id,
            "Ownership check failed"
        );
        return Err(TaskError::Forbidden);
    }

    Ok(task)
}

/// Lists the caller's tasks, optionally narrowed to one status
///
/// Ordered newest-created-first. Never returns another user's tasks
/// regardless of filter values.
pub async fn list(
    pool: &SqlitePool,
    owner_id: i64,
    status: Option<TaskStatus>,
) -> Result<Vec<Task>, TaskError> {
    let tasks = Task::list_by_owner(pool, owner_id, status).await?;
    Ok(tasks)
}

/// Fetches a single task the caller owns
///
/// # Errors
///
/// - `TaskError::NotFound` if no task with that id exists
/// - `TaskError::Forbidden` if it exists but the owner differs
pub async fn get(pool: &SqlitePool, task_id: i64, owner_id: i64) -> Result<Task, TaskError> {
    find_owned(pool, task_id, owner_id).await
}

/// Creates a task owned by the caller
///
/// The title is validated (1-200 characters); status and priority default
/// when omitted; the owner is forced to `owner_id` regardless of anything
/// in the input.
pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    input: CreateTaskInput,
) -> Result<Task, TaskError> {
    validate_title(&input.title)?;

    let task = Task::create(
        pool,
        CreateTask {
            owner_id,
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            due_date: input.due_date,
        },
    )
    .await?;

    tracing::info!(task_id = task.id, owner_id, "Task created");
    Ok(task)
}

/// Updates a task the caller owns
///
/// Applies only the fields present in `input`; a changed title is
/// re-validated; `updated_at` is touched even when the input is empty.
pub async fn update(
    pool: &SqlitePool,
    task_id: i64,
    owner_id: i64,
    input: UpdateTaskInput,
) -> Result<Task, TaskError> {
    find_owned(pool, task_id, owner_id).await?;

    if let Some(ref title) = input.title {
        validate_title(title)?;
    }

    // The row was visible a moment ago; a concurrent delete by the same
    // owner surfaces as NotFound
    let task = Task::update(pool, task_id, input)
        .await?
        .ok_or(TaskError::NotFound)?;

    Ok(task)
}

/// Deletes a task the caller owns
///
/// Removal is permanent and not idempotent: deleting an already-deleted id
/// yields `NotFound`.
pub async fn delete(pool: &SqlitePool, task_id: i64, owner_id: i64) -> Result<(), TaskError> {
    find_owned(pool, task_id, owner_id).await?;

    let deleted = Task::delete(pool, task_id).await?;
    if !deleted {
        return Err(TaskError::NotFound);
    }

    tracing::info!(task_id, owner_id, "Task deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title_empty() {
        let result = validate_title("");
        assert!(matches!(
            result,
            Err(TaskError::Validation { field: "title", .. })
        ));
    }

    #[test]
    fn test_validate_title_too_long() {
        let long = "x".repeat(201);
        assert!(validate_title(&long).is_err());
    }

    #[test]
    fn test_validate_title_boundaries() {
        assert!(validate_title("x").is_ok());
        assert!(validate_title(&"x".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_title_counts_chars_not_bytes() {
        // 200 multibyte characters are within the limit
        let title = "ü".repeat(200);
        assert!(validate_title(&title).is_ok());
    }

    // Ownership and persistence tests are in tests/task_access_tests.rs
}
