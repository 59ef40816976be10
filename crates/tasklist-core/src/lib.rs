pub mod client;
pub mod config;
pub mod data;
pub mod manager;
pub mod storage;
pub mod task;
pub mod view;

pub use client::{ApiError, HttpTaskClient, LocalTaskApi, TaskApi};
pub use config::{ClientConfig, Config, ConfigError, ServerConfig, StorageConfig, WriteMode};
pub use data::{DataError, DataManager, Snapshot};
pub use manager::{ManagerError, TaskManager};
pub use storage::{FileStorage, Storage, StorageError};
pub use task::{Task, TaskId, TaskPatch};
pub use view::{TaskForm, TaskView};
