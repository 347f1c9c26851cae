//! Remote-volume detection against a mount table.

use fsmon_mount::{MountEntry, MountTable};
use std::path::Path;

/// The remote mount holding `path`, if `path` lives on one.
///
/// `path` must already be canonical.
pub(crate) fn remote_mount<'a>(table: &'a MountTable, path: &Path) -> Option<&'a MountEntry> {
    table.lookup(path).filter(|entry| entry.is_remote())
}
