//! Layered git configuration.
//!
//! Configuration files (system, XDG, global, then the repository's own
//! `config`) are loaded through libgit2, which also follows `include.path`.
//! `GIT_CONFIG_COUNT` overrides sit on top of them and are held in memory so
//! nothing is written back to disk. Later layers win.

mod env;
mod error;
mod value;

pub use env::LoadOptions;
pub use error::{ConfigError, Result};
pub use git2::ConfigLevel;
pub use value::expand_path;

use git2::{Config, ErrorCode};
use std::path::{Path, PathBuf};
use value::normalize_key;

/// Loaded configuration for one repository.
pub struct GitConfig {
    files: Config,
    /// Normalized key and value, lowest precedence first.
    overrides: Vec<(String, String)>,
}

impl GitConfig {
    /// An empty configuration.
    pub fn new() -> Result<Self> {
        Ok(Self {
            files: Config::new()?,
            overrides: Vec::new(),
        })
    }

    /// Load the files named by `options`, `<common_dir>/config`, then the
    /// overrides.
    pub fn load(common_dir: &Path, options: &LoadOptions) -> Result<Self> {
        let mut config = Self::new()?;

        let layers = [
            (options.system_file(), ConfigLevel::System),
            (options.xdg_file(), ConfigLevel::XDG),
            (options.global_file(), ConfigLevel::Global),
        ];
        for (path, level) in layers {
            if let Some(path) = path {
                config.add_file(path, level)?;
            }
        }
        let local = config.add_file(&common_dir.join("config"), ConfigLevel::Local)?;

        for (key, value) in options.parameters() {
            config.set_override(key, value)?;
        }

        tracing::debug!(
            common_dir = %common_dir.display(),
            local,
            overrides = config.overrides.len(),
            "loaded git config"
        );
        Ok(config)
    }

    /// Add a config file at `level`. A missing file is skipped and reported
    /// as `Ok(false)`. Each level holds at most one file.
    pub fn add_file(&mut self, path: &Path, level: ConfigLevel) -> Result<bool> {
        if !path.is_file() {
            return Ok(false);
        }
        self.files
            .add_file(path, level, false)
            .map_err(|source| ConfigError::File {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(true)
    }

    /// Set a value above every file layer. Later overrides win.
    pub fn set_override(&mut self, key: &str, value: &str) -> Result<()> {
        let normalized = normalize_key(key).ok_or_else(|| ConfigError::InvalidKey {
            key: key.to_string(),
        })?;
        self.overrides.push((normalized, value.to_string()));
        Ok(())
    }

    fn override_value(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key)?;
        self.overrides
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The winning string value.
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.override_value(key) {
            return Ok(Some(value.to_string()));
        }
        optional(self.files.get_string(key))
    }

    /// The winning value as a boolean; an unrecognized value is an error.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let invalid = |value: String| ConfigError::InvalidBool {
            key: key.to_string(),
            value,
        };

        if let Some(value) = self.override_value(key) {
            return Config::parse_bool(value)
                .map(Some)
                .map_err(|_| invalid(value.to_string()));
        }
        match self.files.get_bool(key) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.code() == ErrorCode::NotFound => Ok(None),
            Err(_) => Err(invalid(self.files.get_string(key).unwrap_or_default())),
        }
    }

    /// The winning value as a boolean, or `None` when it is unset or not a
    /// boolean.
    pub fn get_maybe_bool(&self, key: &str) -> Option<bool> {
        self.get_bool(key).ok().flatten()
    }

    /// The winning value as a path, with `~/` expanded.
    pub fn get_path(&self, key: &str) -> Result<Option<PathBuf>> {
        if let Some(value) = self.override_value(key) {
            return Ok(Some(expand_path(value)));
        }
        optional(self.files.get_path(key))
    }
}

impl std::fmt::Debug for GitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitConfig")
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

fn optional<T>(result: std::result::Result<T, git2::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.code() == ErrorCode::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_local_beats_global() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global");
        let local = dir.path().join("local");
        fs::write(&global, "[core]\n\tfsmonitor = global-hook\n\teditor = vi\n").unwrap();
        fs::write(&local, "[core]\n\tfsmonitor = local-hook\n").unwrap();

        let mut config = GitConfig::new().unwrap();
        // Levels decide precedence, not insertion order.
        assert!(config.add_file(&local, ConfigLevel::Local).unwrap());
        assert!(config.add_file(&global, ConfigLevel::Global).unwrap());

        assert_eq!(
            config.get_string("core.fsmonitor").unwrap().as_deref(),
            Some("local-hook")
        );
        assert_eq!(config.get_string("core.editor").unwrap().as_deref(), Some("vi"));
    }

    #[test]
    fn test_override_wins_with_any_key_case() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("config");
        fs::write(&local, "[core]\n\tuseBuiltinFSMonitor = false\n").unwrap();

        let mut config = GitConfig::new().unwrap();
        config.add_file(&local, ConfigLevel::Local).unwrap();
        config.set_override("CORE.usebuiltinfsmonitor", "yes").unwrap();

        assert_eq!(config.get_bool("core.useBuiltinFSMonitor").unwrap(), Some(true));
        config.set_override("core.useBuiltinFSMonitor", "off").unwrap();
        assert_eq!(config.get_bool("core.useBuiltinFSMonitor").unwrap(), Some(false));
    }

    #[test]
    fn test_include_path_is_followed() {
        let dir = tempdir().unwrap();
        let included = dir.path().join("monitor.inc");
        let local = dir.path().join("config");
        fs::write(&included, "[core]\n\tfsmonitor = included-hook\n").unwrap();
        fs::write(
            &local,
            format!("[include]\n\tpath = {}\n", included.display()),
        )
        .unwrap();

        let mut config = GitConfig::new().unwrap();
        config.add_file(&local, ConfigLevel::Local).unwrap();
        assert_eq!(
            config.get_string("core.fsmonitor").unwrap().as_deref(),
            Some("included-hook")
        );
    }

    #[test]
    fn test_bool_lookups() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("config");
        fs::write(&local, "[core]\n\tbare = sometimes\n\tfsmonitor = hooks/watch\n\tx = 1\n")
            .unwrap();

        let mut config = GitConfig::new().unwrap();
        config.add_file(&local, ConfigLevel::Local).unwrap();

        let err = config.get_bool("core.bare").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { ref value, .. } if value == "sometimes"));
        assert_eq!(config.get_maybe_bool("core.fsmonitor"), None);
        assert_eq!(config.get_maybe_bool("core.x"), Some(true));
        assert_eq!(config.get_bool("core.missing").unwrap(), None);
    }

    #[test]
    fn test_invalid_override() {
        let mut config = GitConfig::new().unwrap();
        assert!(matches!(
            config.set_override("fsmonitor", "x"),
            Err(ConfigError::InvalidKey { .. })
        ));

        config.set_override("core.bare", "perhaps").unwrap();
        assert!(matches!(
            config.get_bool("core.bare"),
            Err(ConfigError::InvalidBool { .. })
        ));
    }

    #[test]
    fn test_missing_file_skipped() {
        let dir = tempdir().unwrap();
        let mut config = GitConfig::new().unwrap();
        assert!(!config
            .add_file(&dir.path().join("absent"), ConfigLevel::Global)
            .unwrap());
        assert_eq!(config.get_string("core.fsmonitor").unwrap(), None);
    }
}
