use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::manager::TaskManager;
use crate::storage::Storage;
use crate::task::{Task, TaskId, TaskPatch};

use super::{ApiError, TaskApi};

/// In-process access to a [`TaskManager`].
///
/// All calls go through one mutex, so mutations issued through the same
/// `LocalTaskApi` never interleave.
pub struct LocalTaskApi<S: Storage> {
    manager: Arc<Mutex<TaskManager<S>>>,
}

impl<S: Storage> LocalTaskApi<S> {
    /// Wraps a manager.
    pub fn new(manager: TaskManager<S>) -> Self {
        Self {
            manager: Arc::new(Mutex::new(manager)),
        }
    }
}

#[async_trait]
impl<S: Storage + Send + 'static> TaskApi for LocalTaskApi<S> {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        Ok(self.manager.lock().await.list_tasks()?)
    }

    async fn create(&self, patch: TaskPatch) -> Result<Task, ApiError> {
        Ok(self.manager.lock().await.create_task(patch)?)
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, ApiError> {
        Ok(self.manager.lock().await.update_task(id, patch)?)
    }

    async fn delete(&self, id: TaskId) -> Result<Task, ApiError> {
        Ok(self.manager.lock().await.delete_task(id)?)
    }
}
