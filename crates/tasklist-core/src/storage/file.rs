use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{StorageConfig, WriteMode};
use crate::task::Task;

use super::error::StorageError;
use super::Storage;

/// JSON-file storage.
///
/// The whole collection lives in one file as a single pretty-printed array:
/// ```text
/// data/tasks.json
///   [
///     { "id": 1, "description": "Buy milk", "category": "errands" },
///     ...
///   ]
/// ```
///
/// Every call reads or writes the full file. There is no file locking, so
/// two processes writing at once can lose an update.
pub struct FileStorage {
    path: PathBuf,
    write_mode: WriteMode,
}

impl FileStorage {
    /// Creates a FileStorage over the given file, overwriting in place.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_mode: WriteMode::Overwrite,
        }
    }

    /// Creates a FileStorage from storage configuration.
    pub fn with_config(config: &StorageConfig) -> Self {
        Self {
            path: config.data_file.clone(),
            write_mode: config.write_mode,
        }
    }

    /// Sets how the file is replaced on save.
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the backing file with an empty collection if it is missing.
    ///
    /// Returns true if a file was created.
    pub fn init(&self) -> Result<bool, StorageError> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::write(parent, e))?;
            }
        }
        self.save(&[])?;
        Ok(true)
    }

    /// Path of the sibling file used for atomic replacement.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        let json = fs::read_to_string(&self.path).map_err(|e| StorageError::read(&self.path, e))?;
        let tasks: Vec<Task> = serde_json::from_str(&json).map_err(|e| StorageError::Parse {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(tasks)?;

        match self.write_mode {
            WriteMode::Overwrite => {
                fs::write(&self.path, json).map_err(|e| StorageError::write(&self.path, e))?;
            }
            WriteMode::Atomic => {
                let tmp = self.temp_path();
                fs::write(&tmp, json).map_err(|e| StorageError::write(&tmp, e))?;
                fs::rename(&tmp, &self.path).map_err(|e| StorageError::write(&self.path, e))?;
            }
        }

        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}
