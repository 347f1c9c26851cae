//! Error types for config loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while reading git configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but libgit2 could not load it.
    #[error("failed to load config file '{path}': {source}")]
    File {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    /// Any other libgit2 failure.
    #[error(transparent)]
    Git(#[from] git2::Error),

    /// Key without a section, e.g. "fsmonitor".
    #[error("invalid config key '{key}'")]
    InvalidKey { key: String },

    /// Value is not a recognized boolean.
    #[error("bad boolean config value '{value}' for '{key}'")]
    InvalidBool { key: String, value: String },

    /// Malformed GIT_CONFIG_COUNT / GIT_CONFIG_KEY_n / GIT_CONFIG_VALUE_n.
    #[error("{message}")]
    InvalidEnv { message: String },
}
