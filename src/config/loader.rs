use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::ShellConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SHELLBOOT_CONFIG";
/// Environment variable overriding the application name.
pub const NAME_ENV: &str = "SHELLBOOT_NAME";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ShellConfig {
    /// Returns the path to the configuration file.
    ///
    /// `SHELLBOOT_CONFIG` wins; otherwise `~/.config/shellboot/config.toml`
    /// or the platform equivalent via `dirs::config_dir()`, falling back to
    /// the current directory.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("shellboot").join("config.toml")
    }

    /// Load from the default location and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_name_override(std::env::var(NAME_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(ShellConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ShellConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Replace the application name when the override is set and non-empty.
    pub fn apply_name_override(&mut self, name: Option<String>) {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            self.application = name;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discovery_resource.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "discovery_resource must not be empty".to_string(),
            });
        }
        if self.application.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "application must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
