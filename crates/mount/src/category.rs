//! Filesystem type classification.

use serde::{Deserialize, Serialize};

/// Broad category of a mounted filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FsCategory {
    /// Local disk (ext4, xfs, btrfs, apfs, ntfs, ...).
    Local,
    /// NFS export.
    Nfs,
    /// CIFS / SMB share.
    Cifs,
    /// SSH-based FUSE mount.
    Sshfs,
    /// Any other network filesystem (AFS, 9p, Ceph, GlusterFS, WebDAV, ...).
    Network,
    /// FUSE mount whose backing store is unknown.
    Fuse,
    /// In-memory filesystem (tmpfs, ramfs).
    Memory,
    /// Kernel pseudo filesystem (proc, sysfs, cgroup, ...).
    Pseudo,
    /// Unrecognized type string.
    Unknown,
}

impl FsCategory {
    /// Whether the volume is served by another machine. Change events for
    /// edits made on that machine never reach the local kernel.
    pub fn is_remote(self) -> bool {
        matches!(self, Self::Nfs | Self::Cifs | Self::Sshfs | Self::Network)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Nfs => "nfs",
            Self::Cifs => "cifs",
            Self::Sshfs => "sshfs",
            Self::Network => "network",
            Self::Fuse => "fuse",
            Self::Memory => "memory",
            Self::Pseudo => "pseudo",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify a filesystem type string as reported by the kernel.
pub fn classify_fstype(fstype: &str) -> FsCategory {
    match fstype {
        "ext2" | "ext3" | "ext4" | "xfs" | "btrfs" | "zfs" | "f2fs" | "reiserfs" | "jfs"
        | "nilfs2" | "bcachefs" | "overlay" => FsCategory::Local,
        "apfs" | "hfs" | "hfsplus" | "ntfs" | "ntfs3" | "vfat" | "msdos" | "exfat" | "ufs"
        | "ffs" => FsCategory::Local,
        "nfs" | "nfs4" => FsCategory::Nfs,
        "cifs" | "smb" | "smb2" | "smb3" | "smbfs" => FsCategory::Cifs,
        "sshfs" | "fuse.sshfs" => FsCategory::Sshfs,
        "afs" | "afpfs" | "9p" | "ceph" | "glusterfs" | "lustre" | "webdav" | "davfs"
        | "fuse.ceph" | "fuse.glusterfs" | "fuse.davfs" | "fuse.rclone" | "fuse.s3fs" => {
            FsCategory::Network
        }
        "fuse" | "fuseblk" => FsCategory::Fuse,
        "tmpfs" | "ramfs" => FsCategory::Memory,
        "proc" | "sysfs" | "devtmpfs" | "devpts" | "devfs" | "securityfs" | "cgroup"
        | "cgroup2" | "pstore" | "debugfs" | "tracefs" | "hugetlbfs" | "mqueue" | "configfs"
        | "efivarfs" | "binfmt_misc" | "fusectl" | "autofs" | "bpf" | "nsfs" => {
            FsCategory::Pseudo
        }
        other if other.starts_with("fuse.") => FsCategory::Fuse,
        _ => FsCategory::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_filesystems() {
        for fstype in ["ext4", "xfs", "btrfs", "apfs", "ntfs3", "overlay"] {
            assert_eq!(classify_fstype(fstype), FsCategory::Local, "{fstype}");
        }
    }

    #[test]
    fn test_network_filesystems_are_remote() {
        assert_eq!(classify_fstype("nfs4"), FsCategory::Nfs);
        assert_eq!(classify_fstype("smb3"), FsCategory::Cifs);
        assert_eq!(classify_fstype("fuse.sshfs"), FsCategory::Sshfs);
        assert_eq!(classify_fstype("9p"), FsCategory::Network);
        assert_eq!(classify_fstype("fuse.rclone"), FsCategory::Network);

        for fstype in ["nfs", "cifs", "fuse.sshfs", "ceph"] {
            assert!(classify_fstype(fstype).is_remote(), "{fstype}");
        }
    }

    #[test]
    fn test_generic_fuse_is_not_remote() {
        assert_eq!(classify_fstype("fuseblk"), FsCategory::Fuse);
        assert_eq!(classify_fstype("fuse.gocryptfs"), FsCategory::Fuse);
        assert!(!FsCategory::Fuse.is_remote());
    }

    #[test]
    fn test_unknown_and_pseudo() {
        assert_eq!(classify_fstype("proc"), FsCategory::Pseudo);
        assert_eq!(classify_fstype("squashfs"), FsCategory::Unknown);
        assert!(!FsCategory::Unknown.is_remote());
        assert!(!FsCategory::Memory.is_remote());
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&FsCategory::Nfs).unwrap();
        assert_eq!(json, "\"nfs\"");
    }
}
