mod error;
mod http;
mod local;

pub use error::ApiError;
pub use http::HttpTaskClient;
pub use local::LocalTaskApi;

use async_trait::async_trait;

use crate::task::{Task, TaskId, TaskPatch};

/// Request/response access to a task store.
///
/// The client view only ever talks to the store through this trait, so it
/// works the same against a remote server or an in-process manager.
///
/// # Implementations
///
/// - [`HttpTaskClient`]: the REST API served by `tasklist serve`
/// - [`LocalTaskApi`]: a [`crate::TaskManager`] in the same process
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<Task>, ApiError>;

    /// Create a task; the store assigns the id.
    async fn create(&self, patch: TaskPatch) -> Result<Task, ApiError>;

    /// Merge `patch` into the task with the given id.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, ApiError>;

    /// Delete a task, returning it as it was.
    async fn delete(&self, id: TaskId) -> Result<Task, ApiError>;
}
