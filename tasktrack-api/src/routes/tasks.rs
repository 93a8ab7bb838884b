/// Task CRUD endpoints
///
/// Every handler here requires a validated identity: the auth layer injects
/// an [`AuthContext`] and the handler passes the user id explicitly into the
/// task access-control layer. Unknown body fields (including any attempt to
/// supply an `owner_id`) are silently ignored by deserialization; the owner
/// is always the authenticated caller.
///
/// # Endpoints
///
/// - `GET    /tasks?status=` - List own tasks, optionally filtered
/// - `POST   /tasks`         - Create a task (201)
/// - `GET    /tasks/:id`     - Fetch one own task
/// - `PUT    /tasks/:id`     - Partial update (present fields only)
/// - `DELETE /tasks/:id`     - Delete (204)
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tasktrack_shared::auth::middleware::AuthContext;
use tasktrack_shared::models::task::{Task, TaskStatus};
use tasktrack_shared::tasks::{self, CreateTaskInput, UpdateTaskInput};

/// Query parameters for task listing
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Optional status filter
    pub status: Option<TaskStatus>,
}

/// `GET /tasks`: lists the caller's tasks, newest-created-first
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let result = tasks::list(&state.db, auth.user_id, query.status).await?;
    Ok(Json(result))
}

/// `GET /tasks/:id`: fetches one task the caller owns
///
/// # Errors
///
/// - `404 Not Found`: no task with that id exists
/// - `403 Forbidden`: the task belongs to another user
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = tasks::get(&state.db, id, auth.user_id).await?;
    Ok(Json(task))
}

/// `POST /tasks`: creates a task owned by the caller
///
/// Status defaults to `pending` and priority to `medium` when omitted.
///
/// # Errors
///
/// - `400 Bad Request`: title missing, empty, or longer than 200 characters
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(input): Json<CreateTaskInput>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = tasks::create(&state.db, auth.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /tasks/:id`: applies the fields present in the body
///
/// Absent fields retain their prior values; an explicit null clears a
/// nullable field; an empty body still touches the updated timestamp.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTaskInput>,
) -> ApiResult<Json<Task>> {
    let task = tasks::update(&state.db, id, auth.user_id, input).await?;
    Ok(Json(task))
}

/// `DELETE /tasks/:id`: permanently removes a task the caller owns
///
/// Not idempotent: a second delete of the same id returns 404.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    tasks::delete(&state.db, id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
