use thiserror::Error;
use tracing::info;

use crate::storage::{Storage, StorageError};
use crate::task::{next_id, Task, TaskId, TaskPatch};

/// Manages the task collection.
///
/// Every operation reloads the whole collection from storage, applies one
/// change in memory and writes the whole collection back. Nothing is cached
/// between calls, so the backing file is the single source of truth.
pub struct TaskManager<S: Storage> {
    storage: S,
}

impl<S: Storage> TaskManager<S> {
    /// Creates a new TaskManager with the given storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Lists every task, in file order.
    pub fn list_tasks(&self) -> Result<Vec<Task>, ManagerError> {
        Ok(self.storage.load()?)
    }

    /// Creates a task from a client patch and persists it.
    ///
    /// The id is assigned here; any id in the patch is ignored. Content is
    /// not validated: every field is stored as given.
    pub fn create_task(&mut self, patch: TaskPatch) -> Result<Task, ManagerError> {
        let mut tasks = self.storage.load()?;
        let task = Task::from_patch(next_id(&tasks), patch);

        tasks.push(task.clone());
        self.storage.save(&tasks)?;

        info!(id = task.id, "created task");
        Ok(task)
    }

    /// Merges a client patch into an existing task and persists it.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, ManagerError> {
        let mut tasks = self.storage.load()?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ManagerError::TaskNotFound(id))?;

        let updated = slot.merged(patch);
        *slot = updated.clone();
        self.storage.save(&tasks)?;

        info!(id, "updated task");
        Ok(updated)
    }

    /// Deletes a task by ID, returning it as it was before removal.
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, ManagerError> {
        let mut tasks = self.storage.load()?;
        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(ManagerError::TaskNotFound(id))?;

        let removed = tasks.remove(index);
        self.storage.save(&tasks)?;

        info!(id, "deleted task");
        Ok(removed)
    }
}

/// Errors that can occur in TaskManager operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStorage;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_manager() -> (TaskManager<FileStorage>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("tasks.json"));
        storage.init().unwrap();
        (TaskManager::new(storage), temp_dir)
    }

    fn patch(value: serde_json::Value) -> TaskPatch {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let (mut manager, _temp) = create_test_manager();

        let first = manager
            .create_task(patch(json!({"description": "Test", "category": "x"})))
            .unwrap();
        let second = manager.create_task(patch(json!({"description": "Second"}))).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_fields_of_any_type_are_stored() {
        let (mut manager, _temp) = create_test_manager();

        let task = manager
            .create_task(patch(json!({"description": null, "category": 5, "tags": ["a"]})))
            .unwrap();

        assert_eq!(task.get("description"), Some(&json!(null)));
        assert_eq!(manager.list_tasks().unwrap(), vec![task]);
    }
}
