use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use finserv_core::error::CoreError;
use finserv_db::StoreError;

use crate::response::SubmissionResponse;

/// Message returned when the datastore is unreachable or the link dropped.
pub const CONNECTION_LOST_MESSAGE: &str =
    "Database connection lost. Please check MySQL server is running.";

/// Message returned when the insert outlives the submission timeout.
pub const TIMEOUT_MESSAGE: &str = "Database query timeout. Please try again.";

/// Prefix for any other datastore failure; the underlying error text follows.
pub const SUBMIT_ERROR_PREFIX: &str = "Error submitting form: ";

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as `{ "success": false, "message": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `finserv_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure from the submission store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No outcome from the store within the submission timeout.
    #[error("Submission timed out")]
    Timeout,

    /// Anything else that went wrong inside the server.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status and visitor-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(CoreError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{SUBMIT_ERROR_PREFIX}{msg}"),
            ),
            AppError::Store(err) if err.is_connection() => (
                StatusCode::SERVICE_UNAVAILABLE,
                CONNECTION_LOST_MESSAGE.to_string(),
            ),
            AppError::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{SUBMIT_ERROR_PREFIX}{err}"),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Timeout => (StatusCode::GATEWAY_TIMEOUT, TIMEOUT_MESSAGE.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Submission failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Submission rejected");
        }

        (status, axum::Json(SubmissionResponse::failure(message))).into_response()
    }
}
