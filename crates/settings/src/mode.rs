//! Mode and reason vocabulary plus the resolution procedure.
//!
//! `resolve_settings` is pure. `ModeResolver` adds the ordering rule: the
//! probe is asked first and configuration is only read for compatible
//! repositories.

use crate::layout::RepoInfo;
use crate::provider::{CompatibilityProbe, ConfigAdapter};
use crate::state::Settings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the repository's working tree is monitored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The repository's location forbids monitoring; see [`Reason`].
    Incompatible,

    /// Monitoring is not configured.
    #[default]
    Disabled,

    /// An external hook process answers change queries (`core.fsmonitor`).
    Hook,

    /// The built-in daemon answers change queries over IPC
    /// (`core.useBuiltinFSMonitor`).
    Ipc,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Incompatible => "incompatible",
            Mode::Disabled => "disabled",
            Mode::Hook => "hook",
            Mode::Ipc => "ipc",
        }
    }

    /// Whether some monitor will be consulted.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Mode::Hook | Mode::Ipc)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Why a repository is incompatible with monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Reason {
    /// Not incompatible.
    #[default]
    Zero,

    /// No working tree to watch.
    Bare,

    /// Working tree is materialized on demand by a virtual filesystem.
    Virtual,

    /// Working tree lives on a remote-mounted volume.
    Remote,

    /// The working tree could not be inspected.
    Error,
}

impl Reason {
    pub fn label(&self) -> &'static str {
        match self {
            Reason::Zero => "ok",
            Reason::Bare => "bare",
            Reason::Virtual => "virtual",
            Reason::Remote => "remote",
            Reason::Error => "error",
        }
    }

    pub fn is_incompatible(&self) -> bool {
        !matches!(self, Reason::Zero)
    }

    /// Human-readable diagnosis for `location` (the working tree, or the git
    /// directory of a bare repository). `None` for [`Reason::Zero`].
    pub fn explain(&self, location: &Path) -> Option<String> {
        let location = location.display();
        match self {
            Reason::Zero => None,
            Reason::Bare => Some(format!(
                "bare repository '{location}' is incompatible with fsmonitor"
            )),
            Reason::Virtual => Some(format!(
                "virtual repository '{location}' is incompatible with fsmonitor"
            )),
            Reason::Remote => Some(format!(
                "remote repository '{location}' is incompatible with fsmonitor"
            )),
            Reason::Error => Some(format!(
                "repository '{location}' is incompatible with fsmonitor due to errors"
            )),
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Map a probe verdict and the two configuration values to settings.
///
/// Priority:
/// 1. Incompatible (any reason other than `Zero`)
/// 2. Ipc (built-in monitor enabled)
/// 3. Hook (non-empty hook path)
/// 4. Disabled
pub fn resolve_settings(reason: Reason, ipc_enabled: bool, hook_path: Option<&str>) -> Settings {
    if reason.is_incompatible() {
        return Settings::incompatible(reason);
    }

    // IPC wins a tie with a configured hook.
    if ipc_enabled {
        return Settings::ipc();
    }

    match hook_path.filter(|path| !path.is_empty()) {
        Some(path) => Settings::hook(path.to_string()),
        None => Settings::disabled(),
    }
}

/// Runs the probe, then the configuration, for one repository.
pub struct ModeResolver<'a> {
    probe: &'a dyn CompatibilityProbe,
    config: &'a dyn ConfigAdapter,
}

impl<'a> ModeResolver<'a> {
    pub fn new(probe: &'a dyn CompatibilityProbe, config: &'a dyn ConfigAdapter) -> Self {
        Self { probe, config }
    }

    pub fn resolve(&self, repo: &RepoInfo) -> Settings {
        let reason = self.probe.incompatible(repo);

        // Configuration is only read for compatible repositories.
        let (ipc_enabled, hook_path) = if reason.is_incompatible() {
            (false, None)
        } else {
            (self.config.read_ipc_enabled(), self.config.read_hook_path())
        };
        let settings = resolve_settings(reason, ipc_enabled, hook_path.as_deref());

        tracing::debug!(
            location = %repo.location().display(),
            mode = %settings.mode(),
            reason = %settings.reason(),
            "resolved fsmonitor settings"
        );
        settings
    }
}
