//! Filesystem-monitor settings for a git repository.
//!
//! Decides, once per repository handle, whether the working tree can be
//! watched and by which mechanism:
//! - Incompatible (bare, virtual filesystem, remote mount, or uninspectable)
//! - Ipc (built-in monitor daemon)
//! - Hook (external query command)
//! - Disabled
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                            │
//! │  mode.rs     - Mode/Reason enums and resolution (pure)      │
//! │  state.rs    - Settings, SettingsCache, FsmonitorReport     │
//! │  provider.rs - Probe and configuration traits               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                       │
//! │  config.rs   - git config snapshot as a StaticConfig        │
//! │  platform/   - bare/virtual/remote-mount probe              │
//! │  layout.rs   - repository discovery via libgit2             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                         │
//! │  repository.rs - handle owning the cached settings          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use fsmon_settings::{Mode, Repository};
//!
//! let mut repo = Repository::open(".")?;
//! match repo.fsmonitor_mode() {
//!     Mode::Hook => println!("hook: {}", repo.fsmonitor_hook_path()?),
//!     Mode::Incompatible => {
//!         let mut why = String::new();
//!         repo.fsmonitor_reason(&mut why);
//!         println!("{why}");
//!     }
//!     mode => println!("{mode}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod layout;
mod mode;
mod provider;
mod repository;
mod state;

pub mod platform;

pub use config::{BUILTIN_FSMONITOR_KEY, FSMONITOR_KEY, VIRTUAL_FILESYSTEM_KEY};
pub use error::{RepoError, Result, SettingsError};
pub use layout::RepoInfo;
pub use mode::{resolve_settings, Mode, ModeResolver, Reason};
pub use provider::{AlwaysCompatible, CompatibilityProbe, ConfigAdapter, StaticConfig};
pub use repository::Repository;
pub use state::{FsmonitorReport, Origin, Settings, SettingsCache};

// Re-export the configuration and mount types callers need to build handles.
pub use fsmon_config::{ConfigError, GitConfig, LoadOptions};
pub use fsmon_mount::MountTable;
