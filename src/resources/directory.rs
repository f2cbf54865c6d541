//! Directory resource.
use std::path::{Path, PathBuf};

use super::helpers::fs::{EntryKind, create_dir, probe};
use super::{Resource, ResourceChange, ResourceState, ensure};
use crate::error::{PrivateFolderError, Result};

/// A real directory that must exist at `path`.
///
/// The check does not follow a final symlink, so a symlink to a directory
/// counts as a conflict.
#[derive(Debug, Clone)]
pub struct DirectoryResource {
    /// Where the directory lives.
    pub path: PathBuf,
    /// Permission bits applied on creation (unix only).
    pub mode: u32,
}

impl DirectoryResource {
    /// Create a new directory resource.
    #[must_use]
    pub fn new(path: &Path, mode: u32) -> Self {
        Self {
            path: path.to_path_buf(),
            mode,
        }
    }

    /// Create the directory (and ancestors) if missing.
    ///
    /// # Errors
    ///
    /// Fails if a non-directory occupies the path or creation fails.
    pub fn apply(&self) -> Result<ResourceChange> {
        ensure(self, |path| {
            create_dir(path, self.mode, true)
                .map_err(PrivateFolderError::io("creating directory", path))
        })
    }
}

impl Resource for DirectoryResource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn expected(&self) -> &'static str {
        "a directory"
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(match probe(&self.path)? {
            None => ResourceState::Missing,
            Some(EntryKind::Directory) => ResourceState::Correct,
            Some(found) => ResourceState::Conflicting { found },
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_directory_with_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let resource = DirectoryResource::new(&nested, 0o755);

        assert_eq!(resource.current_state().unwrap(), ResourceState::Missing);
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert!(nested.is_dir());
    }

    #[test]
    fn existing_directory_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let resource = DirectoryResource::new(dir.path(), 0o755);

        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
        assert_eq!(resource.apply().unwrap(), ResourceChange::AlreadyCorrect);
    }

    #[test]
    fn regular_file_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".private");
        std::fs::write(&file, "not a dir").unwrap();

        let err = DirectoryResource::new(&file, 0o755).apply().unwrap_err();
        assert!(err.is_conflict(), "{err}");
        assert!(err.to_string().contains("a directory"), "{err}");
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "not a dir");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_directory_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        let link = dir.path().join("link");
        std::fs::create_dir(&real).unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let state = DirectoryResource::new(&link, 0o755).current_state().unwrap();
        assert!(matches!(state, ResourceState::Conflicting { .. }));
    }
}
