//! Parsers for the mount table formats we read.
//!
//! All parsers skip malformed lines rather than failing: a partially readable
//! table is still useful for the one lookup we need.

use crate::category::{classify_fstype, FsCategory};
use crate::table::MountEntry;
use std::path::PathBuf;

/// Parse `/proc/self/mountinfo`.
///
/// Format: `id parent major:minor root mount_point options [optional...] - fstype source super_options`
pub fn parse_mountinfo(content: &str) -> Vec<MountEntry> {
    let mut entries = Vec::new();

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 7 {
            continue;
        }

        // Optional fields end at a lone "-".
        let Some(sep) = parts.iter().skip(6).position(|p| *p == "-").map(|i| i + 6) else {
            continue;
        };
        let Some(fstype) = parts.get(sep + 1) else {
            continue;
        };
        let device = parts.get(sep + 2).map(|s| unescape_octal(s)).unwrap_or_default();

        entries.push(MountEntry {
            device,
            mount_point: PathBuf::from(unescape_octal(parts[4])),
            fstype: (*fstype).to_string(),
            category: classify_fstype(fstype),
            options: parts[5].to_string(),
        });
    }

    entries
}

/// Parse `/proc/mounts` (fstab layout).
///
/// Format: `device mount_point fstype options dump pass`
pub fn parse_proc_mounts(content: &str) -> Vec<MountEntry> {
    let mut entries = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            continue;
        }

        entries.push(MountEntry {
            device: unescape_octal(parts[0]),
            mount_point: PathBuf::from(unescape_octal(parts[1])),
            fstype: parts[2].to_string(),
            category: classify_fstype(parts[2]),
            options: parts[3].to_string(),
        });
    }

    entries
}

/// Parse the output of the BSD/macOS `mount` command.
///
/// Format: `device on /mount/point (fstype, flag, flag, ...)`. A mount that
/// lacks the `local` flag is served from elsewhere even when its type string
/// is not one we recognize as a network filesystem.
pub fn parse_bsd_mount_output(content: &str) -> Vec<MountEntry> {
    let mut entries = Vec::new();

    for line in content.lines() {
        let Some((device, rest)) = line.split_once(" on ") else {
            continue;
        };
        let Some(open) = rest.rfind(" (") else {
            continue;
        };
        let mount_point = &rest[..open];
        let flags = rest[open + 2..].trim_end().trim_end_matches(')');

        let mut flags = flags.split(',').map(str::trim);
        let Some(fstype) = flags.next().filter(|f| !f.is_empty()) else {
            continue;
        };
        let options: Vec<&str> = flags.collect();
        let is_local = options.contains(&"local");

        let mut category = classify_fstype(fstype);
        if !is_local
            && matches!(
                category,
                FsCategory::Local | FsCategory::Fuse | FsCategory::Unknown
            )
        {
            category = FsCategory::Network;
        }

        entries.push(MountEntry {
            device: device.to_string(),
            mount_point: PathBuf::from(mount_point),
            fstype: fstype.to_string(),
            category,
            options: options.join(","),
        });
    }

    entries
}

/// Decode the `\ooo` escapes the kernel uses for whitespace and backslashes.
fn unescape_octal(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && is_octal_triplet(&bytes[i + 1..]) {
            let value = (bytes[i + 1] - b'0') as u32 * 64
                + (bytes[i + 2] - b'0') as u32 * 8
                + (bytes[i + 3] - b'0') as u32;
            if let Ok(byte) = u8::try_from(value) {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn is_octal_triplet(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[..3].iter().all(|b| (b'0'..=b'7').contains(b))
}
