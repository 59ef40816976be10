//! Snapshot, backup and restore tools for the task file.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::config::{StorageConfig, BACKUP_PREFIX};
use crate::task::Task;

/// Errors from data-file management.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{kind} file not found: {}", .path.display())]
    SourceMissing { kind: &'static str, path: PathBuf },

    #[error("No task file to back up at {}", .0.display())]
    NothingToBackUp(PathBuf),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DataError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}

/// The bundled snapshots the live file can be reset to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot {
    Seed,
    Test,
    Demo,
}

impl Snapshot {
    pub const ALL: [Snapshot; 3] = [Snapshot::Seed, Snapshot::Test, Snapshot::Demo];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Seed => "Seed Data",
            Self::Test => "Test Data",
            Self::Demo => "Demo Data",
        }
    }

    pub fn path(self, config: &StorageConfig) -> PathBuf {
        match self {
            Self::Seed => config.seed_path(),
            Self::Test => config.test_data_path(),
            Self::Demo => config.demo_path(),
        }
    }
}

/// Summary of one data file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileInfo {
    Missing,
    /// Present but not a readable task list.
    Invalid,
    Tasks {
        count: usize,
        categories: BTreeSet<String>,
    },
}

/// A backup file on disk.
#[derive(Debug, Clone)]
pub struct Backup {
    pub path: PathBuf,
    pub modified: Option<DateTime<Utc>>,
}

impl Backup {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Manages the live task file and its snapshots and backups.
pub struct DataManager {
    config: StorageConfig,
}

impl DataManager {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Path of the live task file.
    pub fn live_path(&self) -> &Path {
        &self.config.data_file
    }

    /// Overwrites the live file with a snapshot.
    pub fn reset_to(&self, snapshot: Snapshot) -> Result<(), DataError> {
        let source = snapshot.path(&self.config);
        if !source.exists() {
            return Err(DataError::SourceMissing {
                kind: snapshot.display_name(),
                path: source,
            });
        }
        self.copy_over_live(&source)?;
        info!(from = %source.display(), "reset task file");
        Ok(())
    }

    /// Copies the live file into the backup directory.
    ///
    /// The backup is named after the live file's modification time in
    /// seconds, so backing up an unchanged file twice reuses the name.
    pub fn backup(&self) -> Result<PathBuf, DataError> {
        let live = self.live_path();
        if !live.exists() {
            return Err(DataError::NothingToBackUp(live.to_path_buf()));
        }

        let modified = fs::metadata(live)
            .and_then(|m| m.modified())
            .map_err(|e| DataError::io(live, e))?;
        let secs = modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        ensure_dir(&self.config.backup_dir)?;
        let target = self
            .config
            .backup_dir
            .join(format!("{}{}.json", BACKUP_PREFIX, secs));
        fs::copy(live, &target).map_err(|e| DataError::io(&target, e))?;

        info!(backup = %target.display(), "created backup");
        Ok(target)
    }

    /// Lists backup files, sorted by name.
    pub fn list_backups(&self) -> Result<Vec<Backup>, DataError> {
        let dir = &self.config.backup_dir;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir).map_err(|e| DataError::io(dir, e))?;
        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DataError::io(dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(BACKUP_PREFIX) && name.ends_with(".json") {
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .ok()
                    .map(DateTime::<Utc>::from);
                backups.push(Backup {
                    path: entry.path(),
                    modified,
                });
            }
        }

        backups.sort_by_key(|b| b.file_name());
        Ok(backups)
    }

    /// Overwrites the live file with a backup.
    ///
    /// A bare file name is looked up in the backup directory.
    pub fn restore(&self, backup: impl AsRef<Path>) -> Result<PathBuf, DataError> {
        let backup = backup.as_ref();
        let source = if backup.exists() {
            backup.to_path_buf()
        } else {
            self.config.backup_dir.join(backup)
        };
        if !source.exists() {
            return Err(DataError::SourceMissing {
                kind: "Backup",
                path: backup.to_path_buf(),
            });
        }
        self.copy_over_live(&source)?;
        info!(from = %source.display(), "restored task file");
        Ok(source)
    }

    /// The live file followed by each snapshot, with display names.
    pub fn files(&self) -> Vec<(&'static str, PathBuf)> {
        let mut files = vec![("Current Tasks", self.config.data_file.clone())];
        files.extend(
            Snapshot::ALL
                .iter()
                .map(|s| (s.display_name(), s.path(&self.config))),
        );
        files
    }

    fn copy_over_live(&self, source: &Path) -> Result<(), DataError> {
        let live = self.live_path();
        if let Some(parent) = live.parent() {
            ensure_dir(parent)?;
        }
        fs::copy(source, live).map_err(|e| DataError::io(live, e))?;
        Ok(())
    }
}

/// Summarizes a data file: task count and sorted categories.
///
/// Tasks without a category are reported as "Unknown".
pub fn file_info(path: &Path) -> FileInfo {
    match read_tasks(path) {
        None if !path.exists() => FileInfo::Missing,
        None => FileInfo::Invalid,
        Some(tasks) => FileInfo::Tasks {
            count: tasks.len(),
            categories: tasks
                .iter()
                .map(|t| match t.get("category") {
                    None => "Unknown".to_string(),
                    Some(_) => t.category_label().into_owned(),
                })
                .collect(),
        },
    }
}

/// Reads a task file, returning `None` if it is missing or invalid.
pub fn read_tasks(path: &Path) -> Option<Vec<Task>> {
    let json = fs::read_to_string(path).ok()?;
    serde_json::from_str(&json).ok()
}

fn ensure_dir(dir: &Path) -> Result<(), DataError> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| DataError::io(dir, e))?;
    }
    Ok(())
}
