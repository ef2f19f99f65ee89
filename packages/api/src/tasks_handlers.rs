// ABOUTME: HTTP request handlers for task template operations
// ABOUTME: All operations are scoped to the authenticated session user

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::response::ApiResponse;
use gameplan_core::{Task, TaskCreateInput};
use gameplan_storage::DbState;

/// List the current user's task templates.
pub async fn list_tasks(
    State(db): State<DbState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<Task>>>, ApiError> {
    info!("Listing tasks for user: {}", user.user_id);

    let tasks = db.task_storage.list_for_user(user.user_id).await?;
    Ok(Json(ApiResponse::success(tasks)))
}

/// Create a new task template for the current user.
pub async fn create_task(
    State(db): State<DbState>,
    user: CurrentUser,
    Json(input): Json<TaskCreateInput>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiError> {
    info!("Creating task for user: {}", user.user_id);

    let task = db.task_storage.create(user.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(task))))
}

/// Delete a task template. Only the owner may delete it, and a task still
/// scheduled in the gameplan is reported as a conflict rather than removed.
pub async fn delete_task(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(task_id): Path<i64>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    info!("Deleting task {} for user: {}", task_id, user.user_id);

    let task = db.task_storage.get(task_id).await?;
    if task.user_id != user.user_id {
        return Err(ApiError::forbidden("That task belongs to another user."));
    }

    db.task_storage.delete(task_id).await?;

    Ok(Json(ApiResponse::success(json!({
        "message": "Task deleted.",
    }))))
}
