//! Bundled static resources (ignore-file template, name dictionary).
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use include_dir::{Dir, include_dir};

use crate::error::{PrivateFolderError, Result};
use crate::resources::helpers::fs::write_new_file;

static ASSETS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets");

/// Logical name of the `.private/.gitignore` template.
pub const GITIGNORE: &str = "gitignore";

/// Logical name of the newline-separated dictionary used for folder names.
pub const WORDS: &str = "words.txt";

/// Read-only lookup of bundled content by logical name.
pub trait AssetSource: fmt::Debug {
    /// Return the bytes of the asset called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PrivateFolderError::ResourceMissing`] if `name` is unknown.
    fn read(&self, name: &str) -> Result<Cow<'static, [u8]>>;
}

/// Assets compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl AssetSource for EmbeddedAssets {
    fn read(&self, name: &str) -> Result<Cow<'static, [u8]>> {
        ASSETS_DIR
            .get_file(name)
            .map(|file| Cow::Borrowed(file.contents()))
            .ok_or_else(|| PrivateFolderError::ResourceMissing(name.to_string()))
    }
}

/// Copy the asset `name` verbatim into a new file at `dest`.
///
/// # Errors
///
/// Returns an error if the asset is unknown, `dest` already exists, or the
/// write fails.
pub fn copy_asset(source: &dyn AssetSource, name: &str, dest: &Path) -> Result<()> {
    let bytes = source.read(name)?;
    write_new_file(dest, &bytes)
}
