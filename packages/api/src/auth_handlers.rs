// ABOUTME: HTTP request handlers for registration, login, and logout
// ABOUTME: Passwords are hashed before storage; sessions are opaque bearer tokens

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::{session_token, CurrentUser};
use crate::error::ApiError;
use crate::response::ApiResponse;
use gameplan_core::MaskedUser;
use gameplan_storage::users::NewUser;
use gameplan_storage::DbState;

/// Request body for registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub home_address: Option<String>,
    pub destination_address: Option<String>,
}

/// Register a new user. Creates the account and seeds every catalog setting
/// with its default value in one transaction.
pub async fn register(
    State(db): State<DbState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Value>>), ApiError> {
    info!("Registering user: {}", request.username);

    if request.password != request.confirm_password {
        return Err(ApiError::validation(
            "Your passwords do not match. Please try again.",
        ));
    }

    let password_hash = gameplan_auth::hash_password(&request.password)?;
    let user = db
        .user_storage
        .register(NewUser {
            username: request.username,
            password_hash,
            home_address: request.home_address,
            destination_address: request.destination_address,
        })
        .await?;

    let masked: MaskedUser = user.into();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(json!({
            "message": "Thank you for registering! Now please login with your credentials.",
            "user": masked,
        }))),
    ))
}

/// Request body for login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a successful login
#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: MaskedUser,
}

/// Check credentials and issue a session token.
pub async fn login(
    State(db): State<DbState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    info!("Login attempt for user: {}", request.username);

    let user = db
        .user_storage
        .get_by_username(&request.username)
        .await?
        .ok_or_else(|| {
            ApiError::unauthorized(
                "Your username does not exist. Please try again or register as a new user.",
            )
        })?;

    if !gameplan_auth::verify_password(&request.password, &user.password_hash)? {
        return Err(ApiError::unauthorized(
            "Incorrect login information. Please try again.",
        ));
    }

    let token = db.session_storage.create(user.user_id).await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        message: "You are now logged in.".to_string(),
        token,
        user: user.into(),
    })))
}

/// Revoke the current session.
pub async fn logout(
    State(db): State<DbState>,
    _user: CurrentUser,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    info!("Logging out user");

    // CurrentUser already authenticated, so a token is present
    if let Some(token) = session_token(&headers) {
        db.session_storage.revoke(token).await?;
    }

    Ok(Json(ApiResponse::success(json!({
        "message": "You are now logged out.",
    }))))
}
