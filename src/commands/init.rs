//! The `init` subcommand.
use std::path::Path;

use anyhow::Result;

use crate::cli::{GlobalOpts, InitOpts, VERSION};
use crate::logging::Logger;
use crate::platform;
use crate::provision::{Provisioned, Provisioner};
use crate::repository;

/// Run the init command.
///
/// # Errors
///
/// Returns an error if no repository encloses the start directory, the
/// per-user config root is unavailable, or provisioning fails.
pub fn run(global: &GlobalOpts, _opts: &InitOpts, log: &Logger) -> Result<()> {
    log.info(&format!("private-folder {VERSION}"));

    let start = super::resolve_start(global)?;
    let config_root = platform::config_root()?;
    let outcome = init_at(&start, &config_root, log);

    log.print_summary();
    let outcome = outcome?;
    log.info(&format!(
        "{} -> {}",
        outcome.folder_name,
        outcome.target.display()
    ));
    Ok(())
}

/// Discover the repository enclosing `start` and provision it against the
/// store under `config_root`.
///
/// # Errors
///
/// Returns an error if discovery or provisioning fails.
pub fn init_at(start: &Path, config_root: &Path, log: &Logger) -> Result<Provisioned> {
    log.stage("Locating repository");
    let repo = repository::discover(start)?;
    log.info(&format!("repository: {}", repo.root().display()));

    Ok(Provisioner::new(&repo, config_root, log).init()?)
}
