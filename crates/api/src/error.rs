//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Authentication errors
    /// Wrong password for a known account. The message is deliberately the
    /// same as [`ApiError::UnknownAccount`] so callers cannot tell which
    /// half of the credential pair was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Login against an email that has no account. Surfaces as 404 but with
    /// the identical "Invalid credentials" message.
    #[error("Invalid credentials")]
    UnknownAccount,
    #[error("Unauthorized")]
    Unauthorized,

    // Signup errors
    #[error("Email already exists")]
    EmailTaken,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource already exists")]
    Conflict,

    // Internal errors
    #[error("Database error: {0}")]
    Database(String),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidCredentials => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::UnknownAccount => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),

            ApiError::EmailTaken => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::UsernameTaken => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            ApiError::Conflict => (StatusCode::CONFLICT, self.to_string()),

            // Never leak backend detail to the caller
            ApiError::Database(_) | ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // Lost a check-then-insert race: the unique constraint is the
            // authoritative uniqueness guarantee, surfaced generically
            StoreError::Duplicate => ApiError::Conflict,
            StoreError::Backend(msg) => {
                tracing::error!(error = %msg, "store error");
                ApiError::Database(msg)
            }
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
