//! Configuration management for tasklist.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `tasklist.toml` file
//! 3. User config `~/.config/tasklist/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,

    /// Storage configuration.
    pub storage: StorageConfig,

    /// Client configuration.
    pub client: ClientConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./tasklist.toml` (project local)
    /// 2. `~/.config/tasklist/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides apply in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(CONFIG_DIR_NAME).join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("TASKLIST_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("TASKLIST_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("TASKLIST_PORT: {}", port)))?;
        }
        if let Ok(file) = std::env::var("TASKLIST_DATA_FILE") {
            self.storage.data_file = PathBuf::from(file);
        }
        if let Ok(mode) = std::env::var("TASKLIST_WRITE_MODE") {
            self.storage.write_mode = WriteMode::parse(&mode)
                .ok_or_else(|| ConfigError::Invalid(format!("TASKLIST_WRITE_MODE: {}", mode)))?;
        }
        if let Ok(url) = std::env::var("TASKLIST_BASE_URL") {
            self.client.base_url = url;
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port` string to bind to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// How the task file is replaced on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and rewrite the file in place. A crash mid-write can leave
    /// a corrupt file.
    #[default]
    Overwrite,
    /// Write a sibling temp file, then rename it over the target.
    Atomic,
}

impl WriteMode {
    /// Parses `overwrite` or `atomic` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Some(Self::Overwrite),
            "atomic" => Some(Self::Atomic),
            _ => None,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// The live task file.
    pub data_file: PathBuf,

    /// How the task file is replaced on save.
    pub write_mode: WriteMode,

    /// Directory holding the seed/test/demo snapshots.
    pub data_dir: PathBuf,

    /// Directory backups are written to and restored from.
    pub backup_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            write_mode: WriteMode::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
        }
    }
}

impl StorageConfig {
    /// Path of the seed snapshot.
    pub fn seed_path(&self) -> PathBuf {
        self.data_dir.join(SEED_FILE)
    }

    /// Path of the test snapshot.
    pub fn test_data_path(&self) -> PathBuf {
        self.data_dir.join(TEST_DATA_FILE)
    }

    /// Path of the demo snapshot.
    pub fn demo_path(&self) -> PathBuf {
        self.data_dir.join(DEMO_FILE)
    }
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the tasklist server.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
