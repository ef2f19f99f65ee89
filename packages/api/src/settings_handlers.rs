// ABOUTME: HTTP request handlers for per-user settings
// ABOUTME: Values are overwritten verbatim; the catalog itself is read-only

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::response::ApiResponse;
use gameplan_core::UserSetting;
use gameplan_storage::DbState;

/// List the current user's settings in creation order.
pub async fn list_settings(
    State(db): State<DbState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<UserSetting>>>, ApiError> {
    info!("Listing settings for user: {}", user.user_id);

    let settings = db.settings_storage.list_for_user(user.user_id).await?;
    Ok(Json(ApiResponse::success(settings)))
}

/// New value for a user setting
#[derive(Deserialize)]
pub struct SettingValue {
    pub value: String,
}

/// Overwrite one of the current user's setting values (PUT with JSON body).
pub async fn update_setting(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(user_setting_id): Path<i64>,
    Json(input): Json<SettingValue>,
) -> Result<Json<ApiResponse<UserSetting>>, ApiError> {
    apply_update(&db, &user, user_setting_id, input).await
}

/// GET spelling of the update, with the value in the query string, kept for
/// plain HTML forms.
pub async fn update_setting_via_query(
    State(db): State<DbState>,
    user: CurrentUser,
    Path(user_setting_id): Path<i64>,
    Query(input): Query<SettingValue>,
) -> Result<Json<ApiResponse<UserSetting>>, ApiError> {
    apply_update(&db, &user, user_setting_id, input).await
}

async fn apply_update(
    db: &DbState,
    user: &CurrentUser,
    user_setting_id: i64,
    input: SettingValue,
) -> Result<Json<ApiResponse<UserSetting>>, ApiError> {
    info!(
        "Updating setting {} for user: {}",
        user_setting_id, user.user_id
    );

    let setting = db.settings_storage.get_user_setting(user_setting_id).await?;
    if setting.user_id != user.user_id {
        return Err(ApiError::forbidden("That setting belongs to another user."));
    }

    let updated = db
        .settings_storage
        .update_value(user_setting_id, &input.value)
        .await?;
    Ok(Json(ApiResponse::success(updated)))
}
