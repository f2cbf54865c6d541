//! Top-level subcommand handlers.
pub mod init;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;

/// Directory repository discovery starts from: `--directory` if given,
/// otherwise the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_start(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref dir) = global.directory {
        return Ok(dir.clone());
    }
    std::env::current_dir().context("cannot determine the current directory")
}
