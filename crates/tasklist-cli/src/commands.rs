//! One-shot command implementations.
//!
//! Each function returns the lines to print so the output can be asserted
//! without capturing stdout.

use std::path::Path;

use serde_json::Value;

use tasklist_core::data::{file_info, read_tasks, FileInfo};
use tasklist_core::{
    DataError, DataManager, FileStorage, ManagerError, Snapshot, StorageConfig, TaskId,
    TaskManager, TaskPatch,
};

/// Adds a task, creating the task file if needed.
pub fn add(
    storage: FileStorage,
    description: &str,
    category: &str,
) -> Result<String, ManagerError> {
    storage.init()?;
    let mut manager = TaskManager::new(storage);

    let mut patch = TaskPatch::new();
    patch.insert("description".to_string(), Value::from(description));
    patch.insert("category".to_string(), Value::from(category));
    let task = manager.create_task(patch)?;

    Ok(format!(
        "Added task {}: {} [{}]",
        task.id,
        task.description(),
        task.category_label()
    ))
}

/// Removes a task by id. A missing file counts as an empty collection.
pub fn remove(storage: FileStorage, id: TaskId) -> Result<String, ManagerError> {
    if !storage.path().exists() {
        return Ok(format!("Task {} not found.", id));
    }

    let mut manager = TaskManager::new(storage);
    match manager.delete_task(id) {
        Ok(_) => Ok(format!("Removed task {}.", id)),
        Err(ManagerError::TaskNotFound(_)) => Ok(format!("Task {} not found.", id)),
        Err(e) => Err(e),
    }
}

/// Lists tasks, optionally restricted to one category.
///
/// The category match ignores case, Unicode included.
pub fn list(storage: FileStorage, category: Option<&str>) -> Result<Vec<String>, ManagerError> {
    let tasks = if storage.path().exists() {
        TaskManager::new(storage).list_tasks()?
    } else {
        Vec::new()
    };

    let wanted = category.filter(|c| !c.is_empty()).map(str::to_lowercase);
    let lines: Vec<String> = tasks
        .iter()
        .filter(|t| match &wanted {
            Some(wanted) => t.category_label().to_lowercase() == *wanted,
            None => true,
        })
        .map(|t| format!("{}: {} [{}]", t.id, t.description(), t.category_label()))
        .collect();

    if lines.is_empty() {
        return Ok(vec!["No tasks found.".to_string()]);
    }
    Ok(lines)
}

/// `data` subcommands.
pub mod data {
    use super::*;

    pub fn init(config: &StorageConfig) -> Result<String, tasklist_core::StorageError> {
        let storage = FileStorage::with_config(config);
        if storage.init()? {
            Ok(format!("Created {}", storage.path().display()))
        } else {
            Ok(format!("{} already exists", storage.path().display()))
        }
    }

    pub fn reset(config: &StorageConfig, snapshot: Snapshot) -> Result<String, DataError> {
        DataManager::new(config.clone()).reset_to(snapshot)?;
        Ok(format!("Reset to {}", snapshot.display_name().to_lowercase()))
    }

    pub fn info(config: &StorageConfig) -> Vec<String> {
        let mut lines = vec!["Data Files Information".to_string(), "=".repeat(50)];

        for (name, path) in DataManager::new(config.clone()).files() {
            match file_info(&path) {
                FileInfo::Missing => lines.push(format!("{}: File not found", name)),
                FileInfo::Invalid => lines.push(format!("{}: Invalid task file", name)),
                FileInfo::Tasks { count, categories } => {
                    lines.push(format!("{}: {} tasks", name, count));
                    if count > 0 {
                        let categories: Vec<_> = categories.into_iter().collect();
                        lines.push(format!("  Categories: {}", categories.join(", ")));
                    }
                }
            }
        }
        lines
    }

    pub fn sample(config: &StorageConfig) -> Vec<String> {
        let mut lines = vec!["Sample Data Preview".to_string(), "=".repeat(50)];

        for snapshot in Snapshot::ALL {
            lines.push(String::new());
            lines.push(format!("{}:", snapshot.display_name()));

            let Some(tasks) = read_tasks(&snapshot.path(config)) else {
                continue;
            };
            for task in tasks.iter().take(3) {
                lines.push(format!(
                    "  {}: {} [{}]",
                    task.id,
                    task.description(),
                    task.category_label()
                ));
            }
            if tasks.len() > 3 {
                lines.push(format!("  ... and {} more tasks", tasks.len() - 3));
            }
        }
        lines
    }

    pub fn backup(config: &StorageConfig) -> Result<String, DataError> {
        let path = DataManager::new(config.clone()).backup()?;
        Ok(format!("Backup created: {}", path.display()))
    }

    pub fn backups(config: &StorageConfig) -> Result<Vec<String>, DataError> {
        let backups = DataManager::new(config.clone()).list_backups()?;
        if backups.is_empty() {
            return Ok(vec!["No backup files found".to_string()]);
        }

        let mut lines = vec!["Available backups:".to_string()];
        lines.extend(backups.iter().map(|b| match b.modified {
            Some(modified) => format!("  {}  ({})", b.file_name(), modified.format("%Y-%m-%d %H:%M:%S")),
            None => format!("  {}", b.file_name()),
        }));
        Ok(lines)
    }

    pub fn restore(config: &StorageConfig, file: &Path) -> Result<String, DataError> {
        let source = DataManager::new(config.clone()).restore(file)?;
        Ok(format!("Restored from: {}", source.display()))
    }
}
