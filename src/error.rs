//! Error types that can escape the bootstrap flow.
//!
//! Command execution failures live in [`crate::shell::CommandError`] and are
//! reported inside the session instead of surfacing here.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Result alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Errors that abort a bootstrap run.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A two-token flag was the last argument.
    #[error("Missing value for '{flag}'")]
    MissingValue { flag: String },

    #[error("Failed to read input file '{path}': {source}")]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read commands from standard input: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Failed to list classpath '{path}': {source}")]
    ClasspathListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Classpath '{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read archive '{path}': {source}")]
    ArchiveRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse archive '{path}': {source}")]
    ArchiveParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A discovery resource named a command type no location provides.
    #[error("Command type '{class_name}' listed in '{resource}' cannot be resolved")]
    Unresolvable { class_name: String, resource: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to acquire terminal: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("Session I/O failed: {0}")]
    Session(#[source] std::io::Error),
}

impl BootstrapError {
    /// Usage errors are raised before any input is read.
    pub fn is_usage(&self) -> bool {
        matches!(self, BootstrapError::MissingValue { .. })
    }
}
