//! Directory symlink resource.
use std::path::{Path, PathBuf};

use super::helpers::fs::{EntryKind, LinkTarget, probe};
use super::{Resource, ResourceState};
use crate::error::Result;

/// A symbolic link at `path` that must resolve to a directory.
///
/// Where the link points is not checked here; only that it is a link and
/// that its target is a directory.
#[derive(Debug, Clone)]
pub struct SymlinkDirResource {
    /// Where the link lives.
    pub path: PathBuf,
}

impl SymlinkDirResource {
    /// Create a new symlink resource.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl Resource for SymlinkDirResource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn expected(&self) -> &'static str {
        "a symlink to a directory"
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(match probe(&self.path)? {
            None => ResourceState::Missing,
            Some(EntryKind::Symlink(LinkTarget::Directory)) => ResourceState::Correct,
            Some(found) => ResourceState::Conflicting { found },
        })
    }
}
