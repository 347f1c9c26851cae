//! Mount table inspection.
//!
//! Answers one question for the settings crate: does a given directory live on
//! a filesystem that delivers local change notifications, or on a volume
//! mounted from somewhere else?
//!
//! - `category.rs` - filesystem type classification (pure)
//! - `parse.rs` - parsers for the Linux and BSD mount table formats (pure)
//! - `table.rs` - `MountTable` lookup plus the per-OS system readers

mod category;
mod parse;
mod table;

pub use category::{classify_fstype, FsCategory};
pub use parse::{parse_bsd_mount_output, parse_mountinfo, parse_proc_mounts};
pub use table::{read_system_mounts, MountEntry, MountTable};
