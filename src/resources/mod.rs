//! Idempotent, type-checked filesystem primitives (check + apply pattern).
//!
//! Every managed path goes through the same two steps: [`Resource::current_state`]
//! classifies whatever is on disk, then [`ensure`] either runs the creation
//! action, reports that the entry is already fine, or fails with
//! [`PrivateFolderError::ConflictingEntry`]. Nothing here deletes, truncates,
//! or rewrites an existing entry.
pub mod directory;
pub mod file;
pub mod helpers;
pub mod symlink;

use std::fmt;
use std::path::Path;

use crate::error::{PrivateFolderError, Result};

pub use directory::DirectoryResource;
pub use file::FileResource;
pub use helpers::fs::{EntryKind, probe};
pub use symlink::SymlinkDirResource;

/// State of a managed path relative to what the resource expects.
///
/// # Examples
///
/// ```
/// use private_folder::resources::{EntryKind, ResourceState};
///
/// let missing = ResourceState::Missing;
/// let wrong = ResourceState::Conflicting { found: EntryKind::Directory };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_ne!(wrong, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the path.
    Missing,
    /// An entry of an acceptable type exists.
    Correct,
    /// An entry of the wrong type exists.
    Conflicting {
        /// What was found on disk.
        found: EntryKind,
    },
}

/// Result of ensuring a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// The entry was created.
    Applied,
    /// The entry already existed with an acceptable type.
    AlreadyCorrect,
}

impl fmt::Display for ResourceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("created"),
            Self::AlreadyCorrect => f.write_str("already present"),
        }
    }
}

/// A managed filesystem path that can classify its current state.
pub trait Resource: fmt::Debug {
    /// The path being managed.
    fn path(&self) -> &Path;

    /// Human-readable description of the acceptable entry type, used in
    /// conflict errors (e.g. `"a directory"`).
    fn expected(&self) -> &'static str;

    /// Classify whatever currently exists at [`path`](Self::path).
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be inspected for a reason other
    /// than it not existing.
    fn current_state(&self) -> Result<ResourceState>;
}

/// Run `create` if `resource` is missing, succeed if it is already correct,
/// and fail with [`PrivateFolderError::ConflictingEntry`] otherwise.
///
/// # Errors
///
/// Returns the conflict error, any error from inspecting the path, or any
/// error returned by `create`.
pub fn ensure<R, F>(resource: &R, create: F) -> Result<ResourceChange>
where
    R: Resource + ?Sized,
    F: FnOnce(&Path) -> Result<()>,
{
    match resource.current_state()? {
        ResourceState::Missing => {
            create(resource.path())?;
            Ok(ResourceChange::Applied)
        }
        ResourceState::Correct => Ok(ResourceChange::AlreadyCorrect),
        ResourceState::Conflicting { found } => Err(PrivateFolderError::ConflictingEntry {
            path: resource.path().to_path_buf(),
            expected: resource.expected(),
            found: found.to_string(),
        }),
    }
}

/// Ensure a directory exists at `path`, creating it and its ancestors with
/// `mode` (unix) when absent.
///
/// # Errors
///
/// Fails if a non-directory occupies `path` or creation fails.
pub fn ensure_directory(path: &Path, mode: u32) -> Result<ResourceChange> {
    DirectoryResource::new(path, mode).apply()
}

/// Ensure something other than a directory exists at `path`, running
/// `create` when absent.
///
/// # Errors
///
/// Fails if a directory occupies `path` or `create` fails.
pub fn ensure_file<F>(path: &Path, create: F) -> Result<ResourceChange>
where
    F: FnOnce(&Path) -> Result<()>,
{
    ensure(&FileResource::new(path), create)
}

/// Ensure a symlink resolving to a directory exists at `path`, running
/// `create` when absent.
///
/// # Errors
///
/// Fails if anything other than a symlink to a directory occupies `path`
/// or `create` fails.
pub fn ensure_symlink_directory<F>(path: &Path, create: F) -> Result<ResourceChange>
where
    F: FnOnce(&Path) -> Result<()>,
{
    ensure(&SymlinkDirResource::new(path), create)
}
