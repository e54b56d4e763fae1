//! Store configuration
//!
//! Loaded from an optional TOML file. Every section and key has a default,
//! so an empty file is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// File name of the database inside the data directory
pub const DEFAULT_DATABASE_FILE: &str = "innkeep.db";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InnkeepConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// `[database]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file. Defaults to `innkeep.db` in the platform data directory.
    pub path: Option<PathBuf>,
    /// How long a writer waits on a locked database before failing
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: 5_000,
        }
    }
}

impl DatabaseConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Configured path, or the default file in the platform data directory
    pub fn resolve_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(DEFAULT_DATABASE_FILE)),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Could not determine data directory")]
    NoDataDir,
}

impl InnkeepConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load the given file if any, otherwise `config.toml` in the platform
    /// config directory if present, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match project_dirs() {
            Some(dirs) => {
                let default_path = dirs.config_dir().join("config.toml");
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
            None => Ok(Self::default()),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "onyx", "innkeep")
}

/// Platform data directory for Innkeep
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(ConfigError::NoDataDir)
}
