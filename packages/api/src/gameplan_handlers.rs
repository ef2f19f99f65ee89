// ABOUTME: HTTP request handlers for gameplan promotion and removal
// ABOUTME: Promoting schedules an owned task; removal leaves the template intact

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
use gameplan_core::{GameplanTask, GameplanTaskCreateInput};
use gameplan_storage::DbState;

/// Promote one of the current user's task templates into the gameplan at
/// the supplied slot.
pub async fn add_task_to_gameplan(
    State(db): State<DbState>,
    user: CurrentUser,
    Json(input): Json<GameplanTaskCreateInput>,
) -> Result<(StatusCode, Json<ApiResponse<GameplanTask>>), ApiError> {
    info!(
        "Adding task {} to gameplan for user: {}",
        input.task_id, user.user_id
    );

    let task = db.task_storage.get(input.task_id).await?;
    if task.user_id != user.user_id {
        return Err(ApiError::forbidden("That task belongs to another user."));
    }

    let entry = db.gameplan_storage.add(user.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(entry))))
}

/// Remove a task from the current user's gameplan. The task template itself
/// is untouched.
pub async fn remove_from_gameplan(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(task_id): Path<i64>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    info!(
        "Removing task {} from gameplan for user: {}",
        task_id, user.user_id
    );

    let entry = db
        .gameplan_storage
        .get(task_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    if entry.user_id != user.user_id {
        return Err(ApiError::forbidden(
            "That gameplan entry belongs to another user.",
        ));
    }

    db.gameplan_storage.remove(task_id).await?;

    Ok(Json(ApiResponse::success(json!({
        "message": "Task removed from gameplan.",
    }))))
}
