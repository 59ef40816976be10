//! Default values for tasklist configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Server Defaults
// ============================================================================

/// Default address the server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3001;

// ============================================================================
// Storage Defaults
// ============================================================================

/// Default path of the live task file.
pub const DEFAULT_DATA_FILE: &str = "data/tasks.json";

/// Default directory holding the seed, test and demo snapshots.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default directory backups are written to.
pub const DEFAULT_BACKUP_DIR: &str = ".";

/// Seed snapshot file name.
pub const SEED_FILE: &str = "tasks_seed.json";

/// Test snapshot file name.
pub const TEST_DATA_FILE: &str = "test_data.json";

/// Demo snapshot file name.
pub const DEMO_FILE: &str = "sample_demo.json";

/// Prefix of backup file names.
pub const BACKUP_PREFIX: &str = "tasks_backup_";

// ============================================================================
// Client Defaults
// ============================================================================

/// Default base URL the clients talk to.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Path of the collection endpoint.
pub const TASKS_ENDPOINT: &str = "/tasks";

// ============================================================================
// Config Files
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "tasklist.toml";

/// Directory name under the user config dir.
pub const CONFIG_DIR_NAME: &str = "tasklist";
