//! Paths managed inside the repository and in the external store.
use std::path::{Path, PathBuf};

use crate::repository::RepositoryContext;

/// Name of the private area directory at the repository root.
pub const BASE_DIR_NAME: &str = ".private";

/// Name of the store directory under the per-user config root.
pub const STORE_DIR_NAME: &str = "private-folder";

/// Paths of the private area inside a working tree.
///
/// # Examples
///
/// ```
/// use private_folder::provision::PrivateAreaLayout;
/// use std::path::Path;
///
/// let layout = PrivateAreaLayout::from_root(Path::new("/work/repo"));
/// assert_eq!(layout.local_link_path, Path::new("/work/repo/.private/files"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateAreaLayout {
    /// `.private`
    pub base_dir: PathBuf,
    /// `.private/.gitignore`
    pub gitignore_path: PathBuf,
    /// `.private/config.toml`
    pub config_path: PathBuf,
    /// `.private/files`, the link into the external store.
    pub local_link_path: PathBuf,
}

impl PrivateAreaLayout {
    /// Derive the layout for the working tree at `root`.
    #[must_use]
    pub fn from_root(root: &Path) -> Self {
        let base_dir = root.join(BASE_DIR_NAME);
        Self {
            gitignore_path: base_dir.join(".gitignore"),
            config_path: base_dir.join("config.toml"),
            local_link_path: base_dir.join("files"),
            base_dir,
        }
    }

    /// Derive the layout for `repo`.
    #[must_use]
    pub fn for_repository(repo: &RepositoryContext) -> Self {
        Self::from_root(repo.root())
    }
}

/// The per-user directory holding one folder per provisioned repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalStore {
    root: PathBuf,
}

impl ExternalStore {
    /// Store located at `<config_root>/private-folder`.
    #[must_use]
    pub fn for_config_root(config_root: &Path) -> Self {
        Self {
            root: config_root.join(STORE_DIR_NAME),
        }
    }

    /// The store directory itself.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The folder reserved under `name`.
    #[must_use]
    pub fn folder(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
