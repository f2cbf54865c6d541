//! Persisted folder configuration (`.private/config.toml`).
//!
//! The record binds a repository to its external storage location. Once
//! written, the folder name never changes.
pub mod toml_loader;

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PrivateFolderError, Result};

/// The persisted record: which external folder this repository links to.
///
/// # Examples
///
/// ```
/// use private_folder::config::FolderConfig;
///
/// let config = FolderConfig::new("apple-river-stone-lamp");
/// assert_eq!(config.folder_name, "apple-river-stone-lamp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Name of the directory under the external store.
    #[serde(rename = "folderName")]
    pub folder_name: String,
}

impl FolderConfig {
    /// Create a record for `folder_name`.
    #[must_use]
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
        }
    }
}

/// Load and validate the record at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] if the file is absent and
/// [`ConfigError::Corrupt`] if it is malformed or names an unusable folder.
pub fn load(path: &Path) -> Result<FolderConfig> {
    let config: FolderConfig = toml_loader::load_config(path)?;
    if let Err(reason) = check_folder_name(&config.folder_name) {
        return Err(ConfigError::Corrupt {
            path: path.to_path_buf(),
            reason: format!("folderName '{}' {reason}", config.folder_name),
        }
        .into());
    }
    Ok(config)
}

/// Write `config` to `path`, replacing any previous content atomically.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save(path: &Path, config: &FolderConfig) -> Result<()> {
    toml_loader::save_config(path, config)
}

/// Ensure `name` can be used as a single directory name under the external
/// store.
///
/// # Errors
///
/// Returns [`PrivateFolderError::InvalidFolderName`] otherwise.
pub fn validate_folder_name(name: &str) -> Result<()> {
    check_folder_name(name).map_err(|reason| PrivateFolderError::InvalidFolderName {
        name: name.to_string(),
        reason,
    })
}

fn check_folder_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("is empty");
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(first)), None) if first == name => Ok(()),
        _ => Err("is not a single path component"),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serialized_form_uses_folder_name_key() {
        let content = toml::to_string(&FolderConfig::new("apple-river-stone-lamp")).unwrap();
        insta::assert_snapshot!(content.trim_end(), @r#"folderName = "apple-river-stone-lamp""#);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = FolderConfig::new("otter-quill-maple-drum");

        save(&path, &config).unwrap();

        assert_eq!(load(&path).unwrap(), config);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "folderName = \"a-b-c-d\"\nextra = 1\n").unwrap();

        assert_eq!(load(&path).unwrap().folder_name, "a-b-c-d");
    }

    #[test]
    fn missing_key_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "other = \"x\"\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(
            err,
            PrivateFolderError::Config(ConfigError::Corrupt { .. })
        ));
    }

    #[test]
    fn traversal_folder_name_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "folderName = \"../../etc\"\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("single path component"), "{err}");
    }

    #[test]
    fn folder_name_validation() {
        assert!(validate_folder_name("apple-river-stone-lamp").is_ok());
        assert!(validate_folder_name("").is_err());
        assert!(validate_folder_name(".").is_err());
        assert!(validate_folder_name("..").is_err());
        assert!(validate_folder_name("a/b").is_err());
        assert!(validate_folder_name("/abs").is_err());
        assert!(validate_folder_name("trailing/").is_err());
    }
}
