//! Repository handle owning the fsmonitor settings slot.

use crate::error::{Result, SettingsError};
use crate::layout::RepoInfo;
use crate::mode::{Mode, ModeResolver, Reason};
use crate::platform::PlatformProbe;
use crate::provider::{CompatibilityProbe, ConfigAdapter, StaticConfig};
use crate::state::{FsmonitorReport, Settings, SettingsCache};
use fsmon_config::{GitConfig, LoadOptions};
use std::path::Path;

/// An opened repository.
///
/// Settings are resolved lazily on the first query and cached until a setter
/// replaces them. Queries take `&mut self`; share a handle across threads
/// behind a `Mutex`.
pub struct Repository {
    info: RepoInfo,
    config: Box<dyn ConfigAdapter>,
    probe: Box<dyn CompatibilityProbe>,
    fsmonitor: SettingsCache,
}

impl Repository {
    /// Discover the repository containing `path`, loading configuration from
    /// the process environment and probing the running system.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = LoadOptions::from_env()?;
        Self::open_with(path.as_ref(), &options, PlatformProbe::system())
    }

    /// Like [`Repository::open`] with explicit configuration sources and probe.
    pub fn open_with(
        path: &Path,
        options: &LoadOptions,
        probe: impl CompatibilityProbe + 'static,
    ) -> Result<Self> {
        let mut info = RepoInfo::discover(path)?;
        let config = GitConfig::load(&info.common_dir, options)?;
        info.apply_config(&config);

        tracing::info!(
            location = %info.location().display(),
            bare = info.is_bare(),
            "opened repository"
        );
        Ok(Self::from_parts(info, StaticConfig::from(&config), probe))
    }

    /// Assemble a handle from already-resolved parts.
    pub fn from_parts(
        info: RepoInfo,
        config: impl ConfigAdapter + 'static,
        probe: impl CompatibilityProbe + 'static,
    ) -> Self {
        Self {
            info,
            config: Box::new(config),
            probe: Box::new(probe),
            fsmonitor: SettingsCache::new(),
        }
    }

    pub fn info(&self) -> &RepoInfo {
        &self.info
    }

    /// Current settings, resolving them on first use.
    pub fn fsmonitor_settings(&mut self) -> &Settings {
        let Self {
            info,
            config,
            probe,
            fsmonitor,
        } = self;
        fsmonitor.get_or_resolve(|| ModeResolver::new(&**probe, &**config).resolve(info))
    }

    pub fn fsmonitor_mode(&mut self) -> Mode {
        self.fsmonitor_settings().mode()
    }

    /// The hook command. Only valid in [`Mode::Hook`].
    pub fn fsmonitor_hook_path(&mut self) -> std::result::Result<&str, SettingsError> {
        let settings = self.fsmonitor_settings();
        settings.hook_path().ok_or(SettingsError::NotHookMode {
            mode: settings.mode(),
        })
    }

    /// The incompatibility reason. When it is not [`Reason::Zero`] an
    /// explanation is appended to `buf`.
    pub fn fsmonitor_reason(&mut self, buf: &mut String) -> Reason {
        let reason = self.fsmonitor_settings().reason();
        if let Some(text) = reason.explain(self.info.location()) {
            buf.push_str(&text);
        }
        reason
    }

    pub fn fsmonitor_report(&mut self) -> FsmonitorReport {
        let location = self.info.location().to_path_buf();
        FsmonitorReport::new(location, self.fsmonitor_settings())
    }

    pub fn set_fsmonitor_ipc(&mut self) {
        self.fsmonitor.set_ipc();
    }

    /// Rejects an empty `path`, leaving the current settings in place.
    pub fn set_fsmonitor_hook(&mut self, path: &str) -> std::result::Result<(), SettingsError> {
        self.fsmonitor.set_hook(path)
    }

    pub fn set_fsmonitor_disabled(&mut self) {
        self.fsmonitor.set_disabled();
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("info", &self.info)
            .field("fsmonitor", &self.fsmonitor)
            .finish_non_exhaustive()
    }
}
