//! API error responses for the task server.
//!
//! Successful responses are plain `Task` / `Vec<Task>` JSON; only failures
//! need a dedicated shape: `{"error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use tasklist_core::ManagerError;

/// Message returned for unknown task ids.
pub const NOT_FOUND_MESSAGE: &str = "Task not found";

/// Message returned when the task file cannot be read or written.
pub const STORAGE_MESSAGE: &str = "Internal server error";

/// Error body sent to clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A failed request: status code plus message.
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
}

impl ApiFailure {
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ManagerError> for ApiFailure {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TaskNotFound(_) => Self::not_found(),
            ManagerError::Storage(e) => {
                // Read and write failures look the same to the caller.
                error!(error = %e, "task storage failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: STORAGE_MESSAGE.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
