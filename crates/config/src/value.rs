//! Helpers for values that do not pass through libgit2.

use std::path::PathBuf;

/// Expand a leading `~` or `~/` to the home directory.
///
/// `~user/` forms are left untouched.
pub fn expand_path(value: &str) -> PathBuf {
    if value == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = value.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(value)
}

/// Canonical form of a `section[.subsection].name` key: section and name
/// lowercased, subsection kept as written. `None` when the key lacks a
/// section or a name.
pub(crate) fn normalize_key(key: &str) -> Option<String> {
    let (section, rest) = key.split_once('.')?;
    let (subsection, name) = match rest.rsplit_once('.') {
        Some((sub, name)) => (Some(sub), name),
        None => (None, rest),
    };
    if section.is_empty() || name.is_empty() {
        return None;
    }

    let section = section.to_ascii_lowercase();
    let name = name.to_ascii_lowercase();
    Some(match subsection {
        Some(sub) => format!("{section}.{sub}.{name}"),
        None => format!("{section}.{name}"),
    })
}
