//! Error types for fsmonitor settings.

use crate::mode::Mode;
use fsmon_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Caller contract violations on the settings API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// `set_hook` called with an empty path.
    #[error("fsmonitor hook path must not be empty")]
    EmptyHookPath,

    /// Hook path requested while the mode is not `Hook`.
    #[error("fsmonitor hook path requested but mode is {mode}")]
    NotHookMode { mode: Mode },
}

/// Errors that can occur while opening a repository handle.
#[derive(Debug, Error)]
pub enum RepoError {
    /// No git directory at or above the path.
    #[error("not a git repository (or any of the parent directories): {path}")]
    NotARepository { path: PathBuf },

    /// libgit2 could not open the repository it found.
    #[error("failed to open repository: {0}")]
    Git(#[from] git2::Error),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for opening repositories.
pub type Result<T> = std::result::Result<T, RepoError>;
