// ABOUTME: API error type mapping storage and auth failures to HTTP responses
// ABOUTME: Every handler returns Result<_, ApiError> for a uniform error envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use thiserror::Error;
use tracing::error;

use crate::response::ApiResponse;
use gameplan_storage::StorageError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("Resource not found")]
    NotFound,

    #[error("{message}")]
    Conflict { message: String },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict {
            message: message.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => ApiError::NotFound,
            StorageError::DuplicateUsername(name) => {
                ApiError::conflict(format!("Username '{}' is already taken.", name))
            }
            StorageError::TaskInGameplan => ApiError::conflict(
                "That task is active in your gameplan! \
                 Remove that task from gameplan before deleting from templates.",
            ),
            other => {
                error!("Storage failure: {}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<gameplan_auth::AuthError> for ApiError {
    fn from(err: gameplan_auth::AuthError) -> Self {
        error!("Credential failure: {}", err);
        ApiError::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiResponse::<()>::error(self.to_string());
        (status, ResponseJson(body)).into_response()
    }
}
