//! Default compatibility probe for the running platform.

mod remote;

use crate::layout::RepoInfo;
use crate::mode::Reason;
use crate::provider::CompatibilityProbe;
use fsmon_mount::MountTable;
use std::borrow::Cow;

#[derive(Debug, Clone)]
enum MountSource {
    /// Read the system table on each probe.
    System,
    Fixed(MountTable),
}

/// Checks repository placement: bare, virtual filesystem, then remote mounts.
#[derive(Debug, Clone)]
pub struct PlatformProbe {
    mounts: MountSource,
}

impl PlatformProbe {
    pub fn system() -> Self {
        Self {
            mounts: MountSource::System,
        }
    }

    /// Probe against a fixed mount table instead of the system one.
    pub fn with_mount_table(table: MountTable) -> Self {
        Self {
            mounts: MountSource::Fixed(table),
        }
    }

    fn mount_table(&self) -> Option<Cow<'_, MountTable>> {
        match &self.mounts {
            MountSource::Fixed(table) => Some(Cow::Borrowed(table)),
            MountSource::System => match MountTable::from_system() {
                Ok(table) => Some(Cow::Owned(table)),
                Err(err) => {
                    tracing::warn!(%err, "failed to read mount table, skipping remote check");
                    None
                }
            },
        }
    }
}

impl Default for PlatformProbe {
    fn default() -> Self {
        Self::system()
    }
}

impl CompatibilityProbe for PlatformProbe {
    fn incompatible(&self, repo: &RepoInfo) -> Reason {
        let Some(worktree) = repo.worktree.as_deref() else {
            return Reason::Bare;
        };

        if repo.virtual_filesystem.is_some() {
            return Reason::Virtual;
        }

        let canonical = match worktree.canonicalize() {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(
                    worktree = %worktree.display(),
                    %err,
                    "cannot resolve working tree"
                );
                return Reason::Error;
            }
        };

        let Some(table) = self.mount_table() else {
            return Reason::Zero;
        };

        match remote::remote_mount(&table, &canonical) {
            Some(mount) => {
                tracing::debug!(
                    worktree = %canonical.display(),
                    mount_point = %mount.mount_point.display(),
                    fstype = %mount.fstype,
                    "working tree is on a remote mount"
                );
                Reason::Remote
            }
            None => Reason::Zero,
        }
    }
}
