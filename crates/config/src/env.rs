//! Environment-driven load options.

use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Which files make up the configuration and which values override them.
///
/// Built once from the process environment with [`LoadOptions::from_env`], or
/// assembled explicitly for hermetic loading.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    system_file: Option<PathBuf>,
    xdg_file: Option<PathBuf>,
    global_file: Option<PathBuf>,
    parameters: Vec<(String, String)>,
}

impl LoadOptions {
    /// Capture the current process environment.
    ///
    /// The system file is located through libgit2 unless the environment
    /// names one or disables it.
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();

        let mut options = Self::from_map(&vars)?;
        if !vars.contains_key("GIT_CONFIG_SYSTEM") && !is_set(&vars, "GIT_CONFIG_NOSYSTEM") {
            options.system_file = git2::Config::find_system().ok();
        }
        Ok(options)
    }

    /// Build options from an explicit set of environment variables.
    ///
    /// Honors `GIT_CONFIG_SYSTEM`, `GIT_CONFIG_NOSYSTEM`, `GIT_CONFIG_GLOBAL`,
    /// `XDG_CONFIG_HOME`, `HOME` and the `GIT_CONFIG_COUNT` /
    /// `GIT_CONFIG_KEY_<n>` / `GIT_CONFIG_VALUE_<n>` override triples.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();
        Self::from_map(&vars)
    }

    fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        let system_file = match vars.get("GIT_CONFIG_SYSTEM") {
            _ if is_set(vars, "GIT_CONFIG_NOSYSTEM") => None,
            Some(path) => non_empty(path),
            None => None,
        };

        let (xdg_file, global_file) = match vars.get("GIT_CONFIG_GLOBAL") {
            Some(path) => (None, non_empty(path)),
            None => default_global_files(vars),
        };

        Ok(Self {
            system_file,
            xdg_file,
            global_file,
            parameters: parse_config_parameters(vars)?,
        })
    }

    pub fn with_system_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.system_file = Some(path.into());
        self
    }

    /// Replace the global file; the XDG file is dropped, as with
    /// `GIT_CONFIG_GLOBAL`.
    pub fn with_global_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.xdg_file = None;
        self.global_file = Some(path.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((key.into(), value.into()));
        self
    }

    pub fn system_file(&self) -> Option<&PathBuf> {
        self.system_file.as_ref()
    }

    pub fn xdg_file(&self) -> Option<&PathBuf> {
        self.xdg_file.as_ref()
    }

    pub fn global_file(&self) -> Option<&PathBuf> {
        self.global_file.as_ref()
    }

    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }
}

fn non_empty(path: &str) -> Option<PathBuf> {
    (!path.is_empty()).then(|| PathBuf::from(path))
}

fn is_set(vars: &HashMap<String, String>, name: &str) -> bool {
    vars.get(name).and_then(|v| git2::Config::parse_bool(v.as_str()).ok()) == Some(true)
}

fn default_global_files(vars: &HashMap<String, String>) -> (Option<PathBuf>, Option<PathBuf>) {
    let home = vars
        .get("HOME")
        .and_then(|h| non_empty(h))
        .or_else(dirs::home_dir);

    let xdg = match vars.get("XDG_CONFIG_HOME").and_then(|x| non_empty(x)) {
        Some(xdg) => Some(xdg.join("git").join("config")),
        None => home.as_ref().map(|h| h.join(".config").join("git").join("config")),
    };
    (xdg, home.map(|h| h.join(".gitconfig")))
}

fn parse_config_parameters(vars: &HashMap<String, String>) -> Result<Vec<(String, String)>> {
    let Some(count) = vars.get("GIT_CONFIG_COUNT") else {
        return Ok(Vec::new());
    };
    if count.is_empty() {
        return Ok(Vec::new());
    }

    let count: usize = count.parse().map_err(|_| ConfigError::InvalidEnv {
        message: format!("bogus count in GIT_CONFIG_COUNT: '{count}'"),
    })?;

    (0..count)
        .map(|i| {
            let key = vars
                .get(&format!("GIT_CONFIG_KEY_{i}"))
                .ok_or_else(|| ConfigError::InvalidEnv {
                    message: format!("missing config key GIT_CONFIG_KEY_{i}"),
                })?;
            let value = vars
                .get(&format!("GIT_CONFIG_VALUE_{i}"))
                .ok_or_else(|| ConfigError::InvalidEnv {
                    message: format!("missing config value GIT_CONFIG_VALUE_{i}"),
                })?;
            Ok((key.clone(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_config_count_triples() {
        let options = LoadOptions::from_vars(vars(&[
            ("HOME", "/home/dev"),
            ("GIT_CONFIG_COUNT", "2"),
            ("GIT_CONFIG_KEY_0", "core.fsmonitor"),
            ("GIT_CONFIG_VALUE_0", "hook"),
            ("GIT_CONFIG_KEY_1", "core.useBuiltinFSMonitor"),
            ("GIT_CONFIG_VALUE_1", "true"),
        ]))
        .unwrap();

        assert_eq!(
            options.parameters(),
            &[
                ("core.fsmonitor".to_string(), "hook".to_string()),
                ("core.useBuiltinFSMonitor".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_key_is_error() {
        let err = LoadOptions::from_vars(vars(&[
            ("GIT_CONFIG_COUNT", "1"),
            ("GIT_CONFIG_VALUE_0", "x"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("GIT_CONFIG_KEY_0"));
    }

    #[test]
    fn test_bogus_count_is_error() {
        let err = LoadOptions::from_vars(vars(&[("GIT_CONFIG_COUNT", "two")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn test_default_global_files() {
        let options = LoadOptions::from_vars(vars(&[("HOME", "/home/dev")])).unwrap();
        assert_eq!(
            options.xdg_file(),
            Some(&PathBuf::from("/home/dev/.config/git/config"))
        );
        assert_eq!(options.global_file(), Some(&PathBuf::from("/home/dev/.gitconfig")));
        assert_eq!(options.system_file(), None);

        let options = LoadOptions::from_vars(vars(&[
            ("HOME", "/home/dev"),
            ("XDG_CONFIG_HOME", "/xdg"),
        ]))
        .unwrap();
        assert_eq!(options.xdg_file(), Some(&PathBuf::from("/xdg/git/config")));
    }

    #[test]
    fn test_git_config_global_replaces_defaults() {
        let options = LoadOptions::from_vars(vars(&[
            ("HOME", "/home/dev"),
            ("GIT_CONFIG_GLOBAL", "/tmp/global.config"),
        ]))
        .unwrap();
        assert_eq!(options.xdg_file(), None);
        assert_eq!(options.global_file(), Some(&PathBuf::from("/tmp/global.config")));

        let options = LoadOptions::from_vars(vars(&[("GIT_CONFIG_GLOBAL", "")])).unwrap();
        assert_eq!(options.global_file(), None);
    }

    #[test]
    fn test_system_file() {
        let options =
            LoadOptions::from_vars(vars(&[("GIT_CONFIG_SYSTEM", "/etc/custom.config")])).unwrap();
        assert_eq!(options.system_file(), Some(&PathBuf::from("/etc/custom.config")));

        let options = LoadOptions::from_vars(vars(&[
            ("GIT_CONFIG_SYSTEM", "/etc/custom.config"),
            ("GIT_CONFIG_NOSYSTEM", "1"),
        ]))
        .unwrap();
        assert_eq!(options.system_file(), None);
    }
}
