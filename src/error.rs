//! Domain-specific error types for private folder provisioning.
//!
//! Library code returns the typed [`PrivateFolderError`] through the
//! [`Result`] alias. The command handlers at the CLI boundary convert it to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! PrivateFolderError
//! ├── RepositoryNotFound / BareRepository : git discovery
//! ├── ConflictingEntry                    : filesystem guard
//! ├── ResourceMissing                     : bundled assets
//! ├── Config(ConfigError)                 : .private/config.toml
//! ├── ConfigRootUnavailable               : per-user config root
//! ├── WordListUnavailable / InvalidFolderName / NameSourceExhausted
//! └── Io                                  : everything else, with context
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T, E = PrivateFolderError> = std::result::Result<T, E>;

/// Top-level error type for provisioning.
#[derive(Error, Debug)]
pub enum PrivateFolderError {
    /// No git repository encloses the starting directory.
    #[error("no git repository found from {}", .start.display())]
    RepositoryNotFound {
        /// Directory discovery started from.
        start: PathBuf,
        /// Underlying discovery error.
        source: git2::Error,
    },

    /// The repository has no working tree to provision.
    #[error("repository at {} is bare and has no working tree", .path.display())]
    BareRepository {
        /// Path of the bare repository.
        path: PathBuf,
    },

    /// An existing filesystem entry has the wrong type for a managed path.
    #[error("{} exists but is not {expected} (found {found})", .path.display())]
    ConflictingEntry {
        /// The managed path.
        path: PathBuf,
        /// What the path should have been.
        expected: &'static str,
        /// What was found instead.
        found: String,
    },

    /// A bundled asset is absent; this is a packaging defect.
    #[error("bundled resource '{0}' is missing")]
    ResourceMissing(String),

    /// Reading or writing the persisted folder configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The platform does not expose a per-user configuration directory.
    #[error("cannot determine the per-user configuration directory")]
    ConfigRootUnavailable,

    /// The dictionary used to generate folder names cannot be used.
    #[error("word list unavailable: {0}")]
    WordListUnavailable(String),

    /// A generated folder name is not a single, normal path component.
    #[error("invalid folder name '{name}': {reason}")]
    InvalidFolderName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A scripted name source ran out of candidates.
    #[error("name source has no more candidates")]
    NameSourceExhausted,

    /// A filesystem operation failed.
    #[error("{context} {}: {source}", .path.display())]
    Io {
        /// Short description of the failed operation.
        context: &'static str,
        /// Path the operation acted on.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl PrivateFolderError {
    /// Build a closure that wraps an [`io::Error`] with operation context.
    ///
    /// Intended for `map_err`:
    ///
    /// ```
    /// use private_folder::error::PrivateFolderError;
    /// use std::path::Path;
    ///
    /// let path = Path::new("/nonexistent/private-folder-doc");
    /// let err = std::fs::read(path)
    ///     .map_err(PrivateFolderError::io("reading", path))
    ///     .unwrap_err();
    /// assert!(err.to_string().starts_with("reading /nonexistent/private-folder-doc"));
    /// ```
    pub fn io(context: &'static str, path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Io {
            context,
            path,
            source,
        }
    }

    /// Return `true` if this is a [`ConflictingEntry`](Self::ConflictingEntry) error.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictingEntry { .. })
    }
}

/// Errors that arise from the persisted folder configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file {} is missing", .path.display())]
    Missing {
        /// Expected location of the file.
        path: PathBuf,
    },

    /// The configuration file exists but cannot be understood.
    #[error("configuration file {} is corrupt: {reason}", .path.display())]
    Corrupt {
        /// Location of the file.
        path: PathBuf,
        /// Parser or validation message.
        reason: String,
    },

    /// The configuration could not be serialized.
    #[error("failed to encode configuration: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn conflicting_entry_display() {
        let e = PrivateFolderError::ConflictingEntry {
            path: PathBuf::from("/repo/.private/.gitignore"),
            expected: "a file",
            found: "directory".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "/repo/.private/.gitignore exists but is not a file (found directory)"
        );
        assert!(e.is_conflict());
    }

    #[test]
    fn resource_missing_display() {
        let e = PrivateFolderError::ResourceMissing("gitignore".to_string());
        assert_eq!(e.to_string(), "bundled resource 'gitignore' is missing");
        assert!(!e.is_conflict());
    }

    #[test]
    fn config_error_is_transparent() {
        let e: PrivateFolderError = ConfigError::Missing {
            path: PathBuf::from("/repo/.private/config.toml"),
        }
        .into();
        assert_eq!(
            e.to_string(),
            "configuration file /repo/.private/config.toml is missing"
        );
    }

    #[test]
    fn io_helper_keeps_source() {
        use std::error::Error as StdError;
        let e = PrivateFolderError::io("creating directory", Path::new("/x"))(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "permission denied",
        ));
        assert!(e.to_string().starts_with("creating directory /x"));
        assert!(e.source().is_some());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_types_are_send_sync() {
        assert_send_sync::<PrivateFolderError>();
        assert_send_sync::<ConfigError>();
    }

    #[test]
    fn errors_convert_to_anyhow() {
        let e = PrivateFolderError::NameSourceExhausted;
        let _anyhow_err: anyhow::Error = e.into();
    }
}
