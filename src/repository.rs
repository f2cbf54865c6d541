//! Git working-tree discovery.
use std::path::{Path, PathBuf};

use crate::error::{PrivateFolderError, Result};

/// The working tree a provisioning run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext {
    root: PathBuf,
}

impl RepositoryContext {
    /// Wrap an already-known working-tree root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path of the working-tree root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Find the git working tree enclosing `start`, walking up through parent
/// directories.
///
/// # Errors
///
/// Returns [`PrivateFolderError::RepositoryNotFound`] if no repository
/// encloses `start`, or [`PrivateFolderError::BareRepository`] if the
/// repository found has no working tree.
pub fn discover(start: &Path) -> Result<RepositoryContext> {
    let repo =
        git2::Repository::discover(start).map_err(|source| PrivateFolderError::RepositoryNotFound {
            start: start.to_path_buf(),
            source,
        })?;

    let workdir = repo
        .workdir()
        .ok_or_else(|| PrivateFolderError::BareRepository {
            path: repo.path().to_path_buf(),
        })?;

    let root = dunce::canonicalize(workdir)
        .map_err(PrivateFolderError::io("resolving repository root", workdir))?;
    Ok(RepositoryContext::new(root))
}
