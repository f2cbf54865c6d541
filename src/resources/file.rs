//! File resource.
use std::path::{Path, PathBuf};

use super::helpers::fs::{EntryKind, probe};
use super::{Resource, ResourceState};
use crate::error::Result;

/// A non-directory entry that must exist at `path`.
///
/// Only directory-ness is checked: a regular file, a symlink (to anything),
/// or a special file all count as present.
#[derive(Debug, Clone)]
pub struct FileResource {
    /// Where the file lives.
    pub path: PathBuf,
}

impl FileResource {
    /// Create a new file resource.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl Resource for FileResource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn expected(&self) -> &'static str {
        "a file"
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(match probe(&self.path)? {
            None => ResourceState::Missing,
            Some(EntryKind::Directory) => ResourceState::Conflicting {
                found: EntryKind::Directory,
            },
            Some(_) => ResourceState::Correct,
        })
    }
}
