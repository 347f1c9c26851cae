//! Repository discovery: git directory, shared config directory, working tree.

use crate::config::VIRTUAL_FILESYSTEM_KEY;
use crate::error::{RepoError, Result};
use fsmon_config::GitConfig;
use git2::ErrorCode;
use std::path::{Path, PathBuf};

/// Where a repository lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    /// Per-worktree git directory.
    pub git_dir: PathBuf,

    /// Directory holding the shared `config` (differs from `git_dir` for
    /// linked worktrees).
    pub common_dir: PathBuf,

    /// `None` for a bare repository.
    pub worktree: Option<PathBuf>,

    /// `core.virtualFilesystem` hook, when configured.
    pub virtual_filesystem: Option<String>,
}

impl RepoInfo {
    pub fn bare(git_dir: impl Into<PathBuf>) -> Self {
        let git_dir = git_dir.into();
        Self {
            common_dir: git_dir.clone(),
            git_dir,
            worktree: None,
            virtual_filesystem: None,
        }
    }

    pub fn with_worktree(git_dir: impl Into<PathBuf>, worktree: impl Into<PathBuf>) -> Self {
        Self {
            worktree: Some(worktree.into()),
            ..Self::bare(git_dir)
        }
    }

    /// Find the repository containing `start`, walking up through parent
    /// directories.
    ///
    /// `.git` directories, gitfiles, linked worktrees, `core.bare` and
    /// `core.worktree` are all resolved by libgit2.
    pub fn discover(start: &Path) -> Result<Self> {
        let repo = git2::Repository::discover(start).map_err(|err| match err.code() {
            ErrorCode::NotFound => RepoError::NotARepository {
                path: start.to_path_buf(),
            },
            _ => RepoError::Git(err),
        })?;
        Ok(Self::from_repository(&repo))
    }

    /// Layout of an already opened repository.
    pub fn from_repository(repo: &git2::Repository) -> Self {
        let worktree = if repo.is_bare() {
            None
        } else {
            repo.workdir().map(normalized)
        };
        let info = Self {
            git_dir: normalized(repo.path()),
            common_dir: normalized(repo.commondir()),
            worktree,
            virtual_filesystem: None,
        };

        tracing::debug!(
            git_dir = %info.git_dir.display(),
            worktree = ?info.worktree,
            "discovered repository"
        );
        info
    }

    /// Pick up `core.virtualFilesystem`.
    pub fn apply_config(&mut self, config: &GitConfig) {
        self.virtual_filesystem = match config.get_string(VIRTUAL_FILESYSTEM_KEY) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                tracing::warn!(key = VIRTUAL_FILESYSTEM_KEY, %err, "ignoring unreadable value");
                None
            }
        };
    }

    pub fn is_bare(&self) -> bool {
        self.worktree.is_none()
    }

    /// The directory diagnostics should name.
    pub fn location(&self) -> &Path {
        self.worktree.as_deref().unwrap_or(&self.git_dir)
    }
}

/// libgit2 reports directories with a trailing separator.
fn normalized(path: &Path) -> PathBuf {
    path.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn set_local(git_dir: &Path, key: &str, value: &str) {
        let mut config = git2::Config::open(&git_dir.join("config")).unwrap();
        config.set_str(key, value).unwrap();
    }

    fn commit_empty_tree(repo: &git2::Repository) {
        let sig = git2::Signature::now("fsmon", "fsmon@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        git2::Repository::init(&root).unwrap();
        fs::create_dir_all(root.join("src/deep")).unwrap();

        let info = RepoInfo::discover(&root.join("src/deep")).unwrap();
        assert_eq!(info.git_dir, root.join(".git"));
        assert_eq!(info.common_dir, root.join(".git"));
        assert_eq!(info.worktree.as_deref(), Some(root.as_path()));
        assert!(!info.is_bare());
    }

    #[test]
    fn test_discover_inside_git_dir_keeps_worktree() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        git2::Repository::init(&root).unwrap();
        set_local(&root.join(".git"), "core.bare", "false");
        fs::create_dir_all(root.join(".git/hooks")).unwrap();

        let info = RepoInfo::discover(&root.join(".git/hooks")).unwrap();
        assert!(!info.is_bare());
        assert_eq!(info.worktree.as_deref(), Some(root.as_path()));
    }

    #[test]
    fn test_discover_bare() {
        let tmp = tempdir().unwrap();
        let git_dir = tmp.path().canonicalize().unwrap().join("repo.git");
        git2::Repository::init_bare(&git_dir).unwrap();

        let info = RepoInfo::discover(&git_dir).unwrap();
        assert!(info.is_bare());
        assert_eq!(info.location(), git_dir.as_path());
    }

    #[test]
    fn test_discover_linked_worktree() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        let main = root.join("main");
        let repo = git2::Repository::init(&main).unwrap();
        commit_empty_tree(&repo);

        let feature = root.join("feature");
        repo.worktree("feature", &feature, None).unwrap();

        let info = RepoInfo::discover(&feature).unwrap();
        assert_eq!(info.git_dir, main.join(".git/worktrees/feature"));
        assert_eq!(info.common_dir, main.join(".git"));
        assert_eq!(info.worktree.as_deref(), Some(feature.as_path()));
    }

    #[test]
    fn test_core_worktree() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        let git_dir = root.join("meta.git");
        fs::create_dir_all(root.join("files")).unwrap();
        git2::Repository::init_bare(&git_dir).unwrap();
        set_local(&git_dir, "core.bare", "false");
        set_local(&git_dir, "core.worktree", "../files");

        let info = RepoInfo::discover(&git_dir).unwrap();
        assert_eq!(info.worktree.as_deref(), Some(root.join("files").as_path()));
    }

    #[test]
    fn test_not_a_repository() {
        let tmp = tempdir().unwrap();
        let err = RepoInfo::discover(tmp.path()).unwrap_err();
        assert!(matches!(err, RepoError::NotARepository { .. }), "{err}");
    }

    #[test]
    fn test_apply_config() {
        let mut info = RepoInfo::with_worktree("/work/.git", "/work");
        let mut config = GitConfig::new().unwrap();
        config
            .set_override(VIRTUAL_FILESYSTEM_KEY, ".git/hooks/virtual-fs")
            .unwrap();

        info.apply_config(&config);
        assert_eq!(
            info.virtual_filesystem.as_deref(),
            Some(".git/hooks/virtual-fs")
        );

        config.set_override(VIRTUAL_FILESYSTEM_KEY, "").unwrap();
        info.apply_config(&config);
        assert_eq!(info.virtual_filesystem, None);
    }
}
