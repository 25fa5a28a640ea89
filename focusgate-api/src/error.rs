/// Error handling for the server
///
/// Handlers return `Result<T, ApiError>`. Because FocusGate is a
/// redirect-driven browser app, most failures never reach this type: bad
/// input and uniqueness conflicts are converted in the handler to a
/// redirect with a transient notice. What remains here is the small set of
/// conditions that end a request abnormally:
///
/// - `AuthRequired` answers with a redirect to the login page and carries
///   no detail about what was missing
/// - `BadRequest` covers unusable request data
/// - `Internal` is the one hard failure (unexpected store errors, broken
///   crypto); the detail is logged and never sent to the client

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// No authenticated session where one is required
    AuthRequired,

    /// Bad request (400)
    BadRequest(String),

    /// Internal server error (500)
    Internal(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "internal_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::AuthRequired => write!(f, "Authentication required"),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Browser flow: an unauthenticated request goes back to the
            // login page, with no hint about what was wrong.
            ApiError::AuthRequired => Redirect::to("/login").into_response(),

            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse {
                    error: "bad_request".to_string(),
                    message: msg,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }

            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                let body = Json(ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "An internal error occurred".to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// Convert store errors to API errors
///
/// By the time a `sqlx::Error` reaches a handler unhandled, the
/// recoverable cases (duplicates, zero-row updates) have already been
/// dealt with, so everything left is internal.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(format!("Database error: {}", err))
    }
}

/// Convert password errors to API errors
impl From<focusgate_shared::auth::password::PasswordError> for ApiError {
    fn from(err: focusgate_shared::auth::password::PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert session token errors to API errors
///
/// A token we failed to mint is our problem; a token we failed to accept
/// is the caller's.
impl From<focusgate_shared::auth::session::SessionError> for ApiError {
    fn from(err: focusgate_shared::auth::session::SessionError) -> Self {
        use focusgate_shared::auth::session::SessionError;

        match err {
            SessionError::CreateError(msg) => {
                ApiError::Internal(format!("Session token creation failed: {}", msg))
            }
            SessionError::ValidationError(_) | SessionError::Expired => ApiError::AuthRequired,
        }
    }
}
