//! Mount table lookup and the per-OS system readers.

use crate::category::FsCategory;
use std::io;
use std::path::{Path, PathBuf};

/// A single mount point with its filesystem classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    /// Device or remote source (e.g. "/dev/sda1" or "host:/export").
    pub device: String,
    /// Local mount point.
    pub mount_point: PathBuf,
    /// Raw filesystem type string.
    pub fstype: String,
    pub category: FsCategory,
    /// Comma-separated mount options.
    pub options: String,
}

impl MountEntry {
    pub fn is_remote(&self) -> bool {
        self.category.is_remote()
    }
}

/// Parsed mount table.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    entries: Vec<MountEntry>,
}

impl MountTable {
    pub fn new(entries: Vec<MountEntry>) -> Self {
        Self { entries }
    }

    /// Read the mount table of the running system.
    pub fn from_system() -> io::Result<Self> {
        read_system_mounts().map(Self::new)
    }

    /// Find the mount that contains `path`.
    ///
    /// The longest matching mount point wins. When the same point is mounted
    /// twice the later entry shadows the earlier one, as it does in the kernel.
    /// `path` should be canonical; symlinks are not resolved here.
    pub fn lookup(&self, path: &Path) -> Option<&MountEntry> {
        let mut best: Option<&MountEntry> = None;
        let mut best_len = 0;

        for entry in &self.entries {
            if !path.starts_with(&entry.mount_point) {
                continue;
            }
            let len = entry.mount_point.as_os_str().len();
            if best.is_none() || len >= best_len {
                best_len = len;
                best = Some(entry);
            }
        }

        best
    }

    pub fn entries(&self) -> &[MountEntry] {
        &self.entries
    }

    pub fn remote_mounts(&self) -> impl Iterator<Item = &MountEntry> {
        self.entries.iter().filter(|e| e.is_remote())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Read and parse the system mount table.
///
/// Linux reads `/proc/self/mountinfo` (falling back to `/proc/mounts`), the
/// BSDs and macOS run `mount`. Other platforms get an empty table.
pub fn read_system_mounts() -> io::Result<Vec<MountEntry>> {
    os::read_system_mounts()
}

#[cfg(target_os = "linux")]
mod os {
    use super::MountEntry;
    use crate::parse::{parse_mountinfo, parse_proc_mounts};
    use std::io;

    pub fn read_system_mounts() -> io::Result<Vec<MountEntry>> {
        match std::fs::read_to_string("/proc/self/mountinfo") {
            Ok(content) => Ok(parse_mountinfo(&content)),
            Err(err) => {
                tracing::debug!(error = %err, "mountinfo unavailable, falling back to /proc/mounts");
                let content = std::fs::read_to_string("/proc/mounts")?;
                Ok(parse_proc_mounts(&content))
            }
        }
    }
}

#[cfg(any(
    target_os = "macos",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
mod os {
    use super::MountEntry;
    use crate::parse::parse_bsd_mount_output;
    use std::io;
    use std::process::Command;

    pub fn read_system_mounts() -> io::Result<Vec<MountEntry>> {
        let output = Command::new("mount").output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "mount exited with {}",
                output.status
            )));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_bsd_mount_output(&stdout))
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
)))]
mod os {
    use super::MountEntry;
    use std::io;

    pub fn read_system_mounts() -> io::Result<Vec<MountEntry>> {
        tracing::debug!("mount table not available on this platform");
        Ok(Vec::new())
    }
}
