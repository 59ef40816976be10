mod error;
mod file;

pub use error::StorageError;
pub use file::FileStorage;

use crate::task::Task;

/// Trait for task collection backends.
///
/// The collection is always loaded and saved as a whole: there is no
/// incremental update and no caching between calls.
pub trait Storage {
    /// Loads the entire collection.
    fn load(&self) -> Result<Vec<Task>, StorageError>;

    /// Replaces the entire collection.
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError>;
}
