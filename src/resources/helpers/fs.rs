//! File-system resource helpers.
use std::fmt;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::error::{PrivateFolderError, Result};

/// What a symbolic link resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// The link resolves to a directory.
    Directory,
    /// The link resolves to something other than a directory.
    NonDirectory,
    /// The link target does not exist.
    Dangling,
}

/// The type of an existing filesystem entry, as seen without following a
/// final symlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A real directory.
    Directory,
    /// A regular file.
    File,
    /// A symbolic link, with what it resolves to.
    Symlink(LinkTarget),
    /// A socket, FIFO, device, or anything else.
    Other,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Directory => "directory",
            Self::File => "regular file",
            Self::Symlink(LinkTarget::Directory) => "symlink to a directory",
            Self::Symlink(LinkTarget::NonDirectory) => "symlink to a non-directory",
            Self::Symlink(LinkTarget::Dangling) => "dangling symlink",
            Self::Other => "special file",
        };
        f.write_str(s)
    }
}

/// Inspect `path` with a single `lstat`.
///
/// Returns `None` when nothing exists at `path`. Symlinks are additionally
/// resolved so callers can tell where they lead; a link whose target does
/// not exist is reported as [`LinkTarget::Dangling`].
///
/// # Errors
///
/// Returns an error if `path` cannot be inspected for any reason other than
/// it not existing (e.g. permission denied on a parent directory), or if a
/// symlink at `path` cannot be resolved for a reason other than a missing
/// target (e.g. a link loop).
pub fn probe(path: &Path) -> Result<Option<EntryKind>> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(PrivateFolderError::io("inspecting", path)(e)),
    };

    let file_type = meta.file_type();
    let kind = if file_type.is_symlink() {
        let target = match std::fs::metadata(path) {
            Ok(resolved) if resolved.is_dir() => LinkTarget::Directory,
            Ok(_) => LinkTarget::NonDirectory,
            Err(e) if e.kind() == io::ErrorKind::NotFound => LinkTarget::Dangling,
            Err(e) => return Err(PrivateFolderError::io("resolving", path)(e)),
        };
        EntryKind::Symlink(target)
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    };
    Ok(Some(kind))
}

/// Create a directory at `path` with `mode` applied on unix.
///
/// With `recursive`, missing ancestors are created too and an existing
/// directory is not an error. Without it the call fails with
/// [`io::ErrorKind::AlreadyExists`] if anything is already there, which
/// makes it usable as an atomic claim.
///
/// # Errors
///
/// Returns the raw I/O error so callers can inspect its kind.
pub fn create_dir(path: &Path, mode: u32, recursive: bool) -> io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)
}

/// Create a directory symlink at `link` pointing to `target`.
///
/// # Errors
///
/// Returns an error if the link cannot be created.
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    std::os::unix::fs::symlink(target, link)
        .map_err(PrivateFolderError::io("creating symlink", link))?;

    #[cfg(windows)]
    std::os::windows::fs::symlink_dir(target, link)
        .map_err(PrivateFolderError::io("creating symlink", link))?;

    Ok(())
}

/// Write `contents` to a new file at `path`.
///
/// Uses `create_new`, so an entry that appeared since the caller last
/// checked is never clobbered.
///
/// # Errors
///
/// Returns an error if `path` already exists or the write fails.
pub fn write_new_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(PrivateFolderError::io("creating file", path))?;
    file.write_all(contents)
        .map_err(PrivateFolderError::io("writing file", path))?;
    file.sync_all()
        .map_err(PrivateFolderError::io("syncing file", path))
}

/// Write `contents` to `path` by staging a sibling temp file and renaming it
/// into place, so readers never observe a partially written file.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = staging_path(path);

    let cleanup_file = || {
        let _ = std::fs::remove_file(&tmp);
    };

    let staged = std::fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .map_err(PrivateFolderError::io("staging file", &tmp));
    if let Err(e) = staged {
        cleanup_file();
        return Err(e);
    }

    if let Err(e) = std::fs::rename(&tmp, path) {
        cleanup_file();
        return Err(PrivateFolderError::io("renaming staged file to", path)(e));
    }
    Ok(())
}

/// Sibling temp path used by [`write_atomic`] (`dir/.name.tmp`).
fn staging_path(path: &Path) -> PathBuf {
    let name = path.file_name().map_or_else(
        || "private-folder".to_string(),
        |n| n.to_string_lossy().into_owned(),
    );
    path.with_file_name(format!(".{name}.tmp"))
}
