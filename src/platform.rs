//! Per-user base directories.
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{PrivateFolderError, Result};

/// Return the per-user configuration root.
///
/// `$XDG_CONFIG_HOME` wins when it holds an absolute path; otherwise the
/// platform default from [`dirs::config_dir`] is used (`~/.config` on Linux,
/// `~/Library/Application Support` on macOS, `%APPDATA%` on Windows).
///
/// # Errors
///
/// Returns [`PrivateFolderError::ConfigRootUnavailable`] if neither source
/// yields a directory.
pub fn config_root() -> Result<PathBuf> {
    resolve_base_dir(std::env::var_os("XDG_CONFIG_HOME"), dirs::config_dir())
        .ok_or(PrivateFolderError::ConfigRootUnavailable)
}

/// Return the per-user cache root, following the same rules as
/// [`config_root`] with `$XDG_CACHE_HOME` and [`dirs::cache_dir`].
#[must_use]
pub fn cache_root() -> Option<PathBuf> {
    resolve_base_dir(std::env::var_os("XDG_CACHE_HOME"), dirs::cache_dir())
}

/// Pick the XDG override when it is an absolute path, else the fallback.
///
/// Relative values are ignored, per the XDG base directory rules.
fn resolve_base_dir(xdg: Option<OsString>, fallback: Option<PathBuf>) -> Option<PathBuf> {
    xdg.map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or(fallback)
}
