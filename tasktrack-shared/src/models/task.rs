/// Task model and database operations
///
/// Tasks are the core entity of TaskTrack: a personal to-do item with a
/// title, optional description, status, priority, and optional due date.
/// Every task has exactly one owner, fixed at creation and never
/// reassigned.
///
/// Status carries no enforced transition graph: any state is reachable
/// from any other via update. That is a deliberate simplicity choice.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     title TEXT NOT NULL,
///     description TEXT,
///     status TEXT NOT NULL DEFAULT 'pending',
///     priority TEXT NOT NULL DEFAULT 'medium',
///     due_date TEXT,
///     created_at TEXT NOT NULL,
///     updated_at TEXT NOT NULL,
///     owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasktrack_shared::models::task::{CreateTask, Task, TaskPriority, TaskStatus};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     owner_id: 1,
///     title: "Write release notes".to_string(),
///     description: None,
///     status: TaskStatus::Pending,
///     priority: TaskPriority::Medium,
///     due_date: None,
/// }).await?;
///
/// let mine = Task::list_by_owner(&pool, 1, Some(TaskStatus::Pending)).await?;
/// assert!(mine.iter().any(|t| t.id == task.id));
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet (the default)
    Pending,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Converts the status to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,

    /// The default
    Medium,

    High,
}

impl TaskPriority {
    /// Converts the priority to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id
    pub id: i64,

    /// Title (1-200 characters)
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Optional due date (calendar date, no time component)
    pub due_date: Option<NaiveDate>,

    /// When the task was created (server-assigned)
    pub created_at: DateTime<Utc>,

    /// When the task was last updated (server-assigned)
    pub updated_at: DateTime<Utc>,

    /// The user who owns this task, fixed at creation
    pub owner_id: i64,
}

/// Input for inserting a new task row
///
/// Defaults for status/priority are resolved by the access layer before
/// this reaches the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owner of the new task
    pub owner_id: i64,

    /// Title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<NaiveDate>,
}

/// Input for updating a task row
///
/// Only present fields are written; absent fields retain their prior
/// values. For the nullable columns (`description`, `due_date`) the outer
/// `Option` tracks presence and the inner one the value, so an explicit
/// JSON `null` clears the column instead of being read as "absent".
/// `updated_at` is always touched, even for an empty update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description; `Some(None)` clears it
    #[serde(default, deserialize_with = "present_or_null")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New due date; `Some(None)` clears it
    #[serde(default, deserialize_with = "present_or_null")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
}

/// Deserializes a field that was present in the input, keeping an explicit
/// `null` distinct from the field being absent (absent fields never reach
/// the deserializer and fall back to the `None` default)
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

impl UpdateTask {
    /// Returns true if no field is present
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

impl Task {
    /// Inserts a new task
    ///
    /// Timestamps are assigned here; callers never supply them.
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, priority, due_date,
                               created_at, updated_at, owner_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, title, description, status, priority, due_date,
                      created_at, updated_at, owner_id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.due_date)
        .bind(now)
        .bind(now)
        .bind(data.owner_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by id, regardless of owner
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, due_date,
                   created_at, updated_at, owner_id
            FROM tasks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks owned by `owner_id`, newest-created-first
    ///
    /// An optional status narrows the result. Other users' tasks are never
    /// returned regardless of the filter.
    pub async fn list_by_owner(
        pool: &SqlitePool,
        owner_id: i64,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = match status {
            Some(status) => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT id, title, description, status, priority, due_date,
                           created_at, updated_at, owner_id
                    FROM tasks
                    WHERE owner_id = ? AND status = ?
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(owner_id)
                .bind(status)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT id, title, description, status, priority, due_date,
                           created_at, updated_at, owner_id
                    FROM tasks
                    WHERE owner_id = ?
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(owner_id)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(tasks)
    }

    /// Updates a task, writing only the fields present in `data`
    ///
    /// The update statement is built dynamically from the present fields;
    /// `updated_at` is always set. Returns the updated task, or `None` if
    /// the row doesn't exist.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE tasks SET updated_at = ?");

        if data.title.is_some() {
            query.push_str(", title = ?");
        }
        if data.description.is_some() {
            query.push_str(", description = ?");
        }
        if data.status.is_some() {
            query.push_str(", status = ?");
        }
        if data.priority.is_some() {
            query.push_str(", priority = ?");
        }
        if data.due_date.is_some() {
            query.push_str(", due_date = ?");
        }

        query.push_str(
            " WHERE id = ? RETURNING id, title, description, status, priority, due_date, \
             created_at, updated_at, owner_id",
        );

        // Bind order must match the textual placeholder order above
        let mut q = sqlx::query_as::<_, Task>(&query).bind(Utc::now());

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            // Inner None writes NULL, clearing the column
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }

        let task = q.bind(id).fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task by id
    ///
    /// Returns true if a row was removed, false if it didn't exist.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_and_strings() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
        assert_eq!(TaskStatus::Pending.as_str(), "pending");
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_priority_defaults_and_strings() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
        assert_eq!(TaskPriority::Low.as_str(), "low");
        assert_eq!(TaskPriority::High.as_str(), "high");
    }

    #[test]
    fn test_status_serde_round_trip() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");

        let parsed: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, TaskStatus::Completed);
    }

    #[test]
    fn test_update_task_is_empty() {
        assert!(UpdateTask::default().is_empty());

        let update = UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_task_null_is_not_absent() {
        // An absent field and an explicit null deserialize differently
        let absent: UpdateTask = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);
        assert_eq!(absent.due_date, None);
        assert!(absent.is_empty());

        let nulled: UpdateTask =
            serde_json::from_str(r#"{"description": null, "due_date": null}"#).unwrap();
        assert_eq!(nulled.description, Some(None));
        assert_eq!(nulled.due_date, Some(None));
        assert!(!nulled.is_empty());

        let valued: UpdateTask = serde_json::from_str(r#"{"description": "note"}"#).unwrap();
        assert_eq!(valued.description, Some(Some("note".to_string())));
    }

    // Integration tests for database operations are in tests/task_access_tests.rs
}
