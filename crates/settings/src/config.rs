//! Reads monitor settings out of git configuration.

use crate::provider::StaticConfig;
use fsmon_config::GitConfig;

/// Hook command, or a boolean selecting the built-in monitor.
pub const FSMONITOR_KEY: &str = "core.fsmonitor";

/// Older switch for the built-in monitor.
pub const BUILTIN_FSMONITOR_KEY: &str = "core.useBuiltinFSMonitor";

/// Hook that materializes the working tree on demand.
pub const VIRTUAL_FILESYSTEM_KEY: &str = "core.virtualFilesystem";

impl From<&GitConfig> for StaticConfig {
    /// Unreadable or malformed values are logged and treated as unset.
    fn from(config: &GitConfig) -> Self {
        Self {
            hook_path: hook_path(config),
            ipc_enabled: ipc_enabled(config),
        }
    }
}

fn hook_path(config: &GitConfig) -> Option<String> {
    // A boolean here selects (or disables) the built-in monitor.
    if config.get_maybe_bool(FSMONITOR_KEY).is_some() {
        return None;
    }

    match config.get_path(FSMONITOR_KEY) {
        Ok(path) => path.map(|p| p.to_string_lossy().into_owned()),
        Err(err) => {
            tracing::warn!(key = FSMONITOR_KEY, %err, "ignoring unreadable hook path");
            None
        }
    }
}

fn ipc_enabled(config: &GitConfig) -> bool {
    if config.get_maybe_bool(FSMONITOR_KEY) == Some(true) {
        return true;
    }

    match config.get_bool(BUILTIN_FSMONITOR_KEY) {
        Ok(enabled) => enabled.unwrap_or(false),
        Err(err) => {
            tracing::warn!(key = BUILTIN_FSMONITOR_KEY, %err, "invalid boolean, treating as false");
            false
        }
    }
}
