//! Collaborator traits the resolver calls through.
//!
//! The platform probe and the configuration source are injected so the
//! resolution logic stays testable on every platform.

use crate::layout::RepoInfo;
use crate::mode::Reason;

/// Decides whether a repository's location can deliver change notifications.
///
/// Implementations must absorb their own failures and report them as a
/// [`Reason`]; resolution never fails.
pub trait CompatibilityProbe: Send + Sync {
    /// `Reason::Zero` when compatible.
    fn incompatible(&self, repo: &RepoInfo) -> Reason;
}

/// Reads the two settings that select a monitor mechanism.
pub trait ConfigAdapter: Send + Sync {
    /// Configured hook command, if any.
    fn read_hook_path(&self) -> Option<String>;

    /// Whether the built-in IPC monitor is enabled.
    fn read_ipc_enabled(&self) -> bool;
}

/// Probe for platforms without placement checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCompatible;

impl CompatibilityProbe for AlwaysCompatible {
    fn incompatible(&self, _repo: &RepoInfo) -> Reason {
        Reason::Zero
    }
}

/// Fixed configuration values, for embedding programs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticConfig {
    pub hook_path: Option<String>,
    pub ipc_enabled: bool,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(mut self, path: impl Into<String>) -> Self {
        self.hook_path = Some(path.into());
        self
    }

    pub fn with_ipc(mut self, enabled: bool) -> Self {
        self.ipc_enabled = enabled;
        self
    }
}

impl ConfigAdapter for StaticConfig {
    fn read_hook_path(&self) -> Option<String> {
        self.hook_path.clone()
    }

    fn read_ipc_enabled(&self) -> bool {
        self.ipc_enabled
    }
}
