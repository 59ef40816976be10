use thiserror::Error;

use crate::manager::ManagerError;
use crate::task::TaskId;

/// Errors that can occur when talking to a task store.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Store returned error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TaskNotFound(id) => ApiError::NotFound(id),
            other => ApiError::Store(other.to_string()),
        }
    }
}
