// ABOUTME: HTTP request handlers for the composite and static views
// ABOUTME: Home greeting, dashboard aggregation, about page, and liveness

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::auth::{CurrentUser, OptionalUser};
use crate::error::ApiError;
use crate::response::ApiResponse;
use gameplan_core::{GameplanTask, Task, DASHBOARD_SETTINGS};
use gameplan_storage::DbState;

/// Home view: greets the session user by name, or as "friend".
pub async fn home(
    State(db): State<DbState>,
    OptionalUser(user_id): OptionalUser,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let username = match user_id {
        Some(user_id) => db.user_storage.get(user_id).await?.username,
        None => "friend".to_string(),
    };

    Ok(Json(ApiResponse::success(json!({
        "username": username,
    }))))
}

/// Registration form descriptor, the JSON stand-in for the old HTML form.
pub async fn register_form() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({
        "fields": ["username", "password", "confirm_password"],
    })))
}

/// Composite dashboard view
#[derive(Serialize)]
pub struct DashboardView {
    pub username: String,
    pub tasks: Vec<Task>,
    pub gameplan_tasks: Vec<GameplanTask>,
    pub priority: Option<String>,
    pub intention: Option<String>,
    pub notes_reminders: Option<String>,
}

/// Dashboard: the user's templates, their ordered gameplan, and the three
/// dashboard settings resolved by catalog name.
pub async fn dashboard(
    State(db): State<DbState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardView>>, ApiError> {
    info!("Rendering dashboard for user: {}", user.user_id);

    let username = db.user_storage.get(user.user_id).await?.username;
    let tasks = db.task_storage.list_for_user(user.user_id).await?;
    let gameplan_tasks = db.gameplan_storage.list_for_user(user.user_id).await?;

    let [priority_name, intention_name, notes_name] = DASHBOARD_SETTINGS;
    let priority = db
        .settings_storage
        .value_by_name(user.user_id, priority_name)
        .await?;
    let intention = db
        .settings_storage
        .value_by_name(user.user_id, intention_name)
        .await?;
    let notes_reminders = db
        .settings_storage
        .value_by_name(user.user_id, notes_name)
        .await?;

    Ok(Json(ApiResponse::success(DashboardView {
        username,
        tasks,
        gameplan_tasks,
        priority,
        intention,
        notes_reminders,
    })))
}

/// Static about page.
pub async fn about() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({
        "name": "Gameplan",
        "description": "Plan your morning the night before: keep a list of \
                        task templates and promote them into an ordered, \
                        timed gameplan.",
    })))
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(json!({
        "status": "healthy",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "service": "gameplan",
    }))
}
