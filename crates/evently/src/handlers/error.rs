use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use evently_core::event::EventError;
use evently_core::storage::{repository_error_to_status_code, RepositoryError};

/// Generic handler error. Repository errors keep their mapped status code.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        tracing::warn!(status = %status_code, error = %self.0, "Request failed");
        (status_code, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Errors returned by the `/api/events` handlers.
///
/// Every variant renders as a JSON object with a `message`; server-side
/// failures also carry the underlying `error` text.
#[derive(Debug)]
pub enum EventApiError {
    /// The submission itself is invalid (400).
    Invalid(EventError),
    /// Reading the form, uploading, connecting or inserting failed (500).
    CreationFailed(String),
    /// Connecting or querying failed while listing (500).
    FetchFailed(String),
}

impl EventApiError {
    pub fn creation(err: impl std::fmt::Display) -> Self {
        Self::CreationFailed(err.to_string())
    }

    pub fn fetch(err: impl std::fmt::Display) -> Self {
        Self::FetchFailed(err.to_string())
    }
}

impl From<EventError> for EventApiError {
    fn from(err: EventError) -> Self {
        Self::Invalid(err)
    }
}

impl IntoResponse for EventApiError {
    fn into_response(self) -> Response {
        match self {
            EventApiError::Invalid(err) => {
                tracing::warn!(error = ?err, "Rejected event submission");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": err.to_string() })),
                )
                    .into_response()
            }
            EventApiError::CreationFailed(error) => {
                tracing::error!(%error, "Event creation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Event Creation Failed", "error": error })),
                )
                    .into_response()
            }
            EventApiError::FetchFailed(error) => {
                tracing::error!(%error, "Event fetching failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Event fetching failed", "error": error })),
                )
                    .into_response()
            }
        }
    }
}
