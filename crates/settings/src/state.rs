//! Resolved settings and the per-repository cache slot.

use crate::error::SettingsError;
use crate::mode::{Mode, Reason};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the current settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Computed from the probe and configuration.
    #[default]
    Resolved,
    /// Installed by an explicit setter call.
    Override,
}

/// Resolved fsmonitor state for one repository.
///
/// `reason` is non-`Zero` exactly when `mode` is `Incompatible`, and
/// `hook_path` is present exactly when `mode` is `Hook`. The constructors are
/// the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    mode: Mode,
    reason: Reason,
    hook_path: Option<String>,
    origin: Origin,
}

impl Settings {
    pub(crate) fn incompatible(reason: Reason) -> Self {
        debug_assert!(reason.is_incompatible());
        Self {
            mode: Mode::Incompatible,
            reason,
            hook_path: None,
            origin: Origin::Resolved,
        }
    }

    pub(crate) fn disabled() -> Self {
        Self {
            mode: Mode::Disabled,
            reason: Reason::Zero,
            hook_path: None,
            origin: Origin::Resolved,
        }
    }

    pub(crate) fn ipc() -> Self {
        Self {
            mode: Mode::Ipc,
            ..Self::disabled()
        }
    }

    pub(crate) fn hook(path: String) -> Self {
        debug_assert!(!path.is_empty());
        Self {
            mode: Mode::Hook,
            hook_path: Some(path),
            ..Self::disabled()
        }
    }

    fn into_override(self) -> Self {
        Self {
            origin: Origin::Override,
            ..self
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn reason(&self) -> Reason {
        self.reason
    }

    /// Present only in [`Mode::Hook`].
    pub fn hook_path(&self) -> Option<&str> {
        self.hook_path.as_deref()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }
}

/// Memoized settings for one repository handle.
///
/// Empty until the first query; after that the stored value is returned
/// until a setter replaces it. There is no internal locking: a handle shared
/// between threads must be wrapped by the caller.
#[derive(Debug, Default)]
pub struct SettingsCache {
    slot: Option<Settings>,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.is_some()
    }

    /// Current settings without triggering resolution.
    pub fn peek(&self) -> Option<&Settings> {
        self.slot.as_ref()
    }

    /// Return the cached settings, running `resolve` first if the slot is
    /// empty. `resolve` runs at most once per cache lifetime unless nothing
    /// is ever cached.
    pub fn get_or_resolve<F>(&mut self, resolve: F) -> &Settings
    where
        F: FnOnce() -> Settings,
    {
        self.slot.get_or_insert_with(resolve)
    }

    pub fn set_ipc(&mut self) {
        self.install(Settings::ipc());
    }

    /// Rejects an empty path and leaves the cache untouched in that case.
    pub fn set_hook(&mut self, path: &str) -> Result<(), SettingsError> {
        if path.is_empty() {
            return Err(SettingsError::EmptyHookPath);
        }
        self.install(Settings::hook(path.to_string()));
        Ok(())
    }

    pub fn set_disabled(&mut self) {
        self.install(Settings::disabled());
    }

    fn install(&mut self, settings: Settings) {
        tracing::info!(
            previous = self.slot.as_ref().map(|s| s.mode().label()).unwrap_or("unresolved"),
            mode = %settings.mode(),
            "fsmonitor settings overridden"
        );
        self.slot = Some(settings.into_override());
    }
}

/// Diagnostic snapshot of a repository's fsmonitor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsmonitorReport {
    /// Working tree, or git directory for a bare repository.
    pub location: PathBuf,

    pub mode: Mode,

    pub reason: Reason,

    pub hook_path: Option<String>,

    /// Present when `reason` is not `Zero`.
    pub explanation: Option<String>,

    pub origin: Origin,

    /// When the report was taken.
    pub timestamp_ms: i64,
}

impl FsmonitorReport {
    pub fn new(location: PathBuf, settings: &Settings) -> Self {
        let explanation = settings.reason().explain(&location);
        Self {
            location,
            mode: settings.mode(),
            reason: settings.reason(),
            hook_path: settings.hook_path().map(str::to_string),
            explanation,
            origin: settings.origin(),
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// One line per fact, for terminal output.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Location: {}", self.location.display()),
            format!("Mode: {}", self.mode),
        ];
        if let Some(ref hook) = self.hook_path {
            lines.push(format!("Hook: {hook}"));
        }
        if let Some(ref explanation) = self.explanation {
            lines.push(format!("Reason: {explanation}"));
        }
        if self.origin == Origin::Override {
            lines.push("Origin: explicit override".to_string());
        }
        lines.join("\n")
    }
}
