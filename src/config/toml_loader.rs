//! TOML record loading and saving.
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ConfigError, PrivateFolderError, Result};
use crate::resources::helpers::fs::write_atomic;

/// Deserialize the TOML record stored at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] if `path` does not exist,
/// [`ConfigError::Corrupt`] if it cannot be parsed into `T`, and an I/O error
/// for any other read failure.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return Err(ConfigError::Corrupt {
                path: path.to_path_buf(),
                reason: "file is not valid UTF-8".to_string(),
            }
            .into());
        }
        Err(e) => return Err(PrivateFolderError::io("reading config", path)(e)),
    };

    toml::from_str(&content).map_err(|e| {
        ConfigError::Corrupt {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        }
        .into()
    })
}

/// Serialize `value` as TOML and write it atomically to `path`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_config<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = toml::to_string(value).map_err(ConfigError::from)?;
    write_atomic(path, content.as_bytes())
}
