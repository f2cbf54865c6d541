//! Provisioning of the private area: the `init` procedure.
//!
//! [`Provisioner::init`] walks a fixed sequence of idempotent steps. Each
//! step either creates what is missing or accepts what is already there, so
//! running `init` again after success or after a partial failure is safe.
//! The first failing step stops the run.
pub mod layout;
pub mod reservation;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::assets::{self, AssetSource, EmbeddedAssets};
use crate::config::{self, FolderConfig};
use crate::error::Result;
use crate::logging::{Logger, StepStatus};
use crate::names::{NameSource, WordListNames};
use crate::repository::RepositoryContext;
use crate::resources::helpers::fs::create_symlink;
use crate::resources::{self, ResourceChange};

pub use layout::{ExternalStore, PrivateAreaLayout};

/// Mode of `.private` on unix.
const BASE_DIR_MODE: u32 = 0o755;

/// One step of [`Provisioner::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Create `.private`.
    BaseDirectory,
    /// Install `.private/.gitignore` from the template.
    IgnoreFile,
    /// Reserve an external folder and record it in `.private/config.toml`.
    FolderConfig,
    /// Link `.private/files` to the reserved folder.
    Link,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BaseDirectory => "private directory",
            Self::IgnoreFile => "ignore file",
            Self::FolderConfig => "folder configuration",
            Self::Link => "files link",
        })
    }
}

/// Outcome of a successful [`Provisioner::init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    /// The folder name recorded in `.private/config.toml`.
    pub folder_name: String,
    /// The external folder `.private/files` points to.
    pub target: PathBuf,
    /// What each step did, in execution order.
    pub changes: Vec<(Step, ResourceChange)>,
}

impl Provisioned {
    /// Return `true` if no step had to create anything.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.changes
            .iter()
            .all(|(_, change)| *change == ResourceChange::AlreadyCorrect)
    }
}

/// Sets up the private area of one repository.
///
/// Assets default to the embedded set. Names default to random words from
/// the asset dictionary, loaded only when a folder has to be reserved.
pub struct Provisioner<'a> {
    layout: PrivateAreaLayout,
    store: ExternalStore,
    assets: Box<dyn AssetSource + 'a>,
    names: Option<Box<dyn NameSource + 'a>>,
    log: &'a Logger,
}

impl fmt::Debug for Provisioner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provisioner")
            .field("layout", &self.layout)
            .field("store", &self.store)
            .field("assets", &self.assets)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl<'a> Provisioner<'a> {
    /// Provision `repo` against the store under `config_root`.
    #[must_use]
    pub fn new(repo: &RepositoryContext, config_root: &Path, log: &'a Logger) -> Self {
        Self {
            layout: PrivateAreaLayout::for_repository(repo),
            store: ExternalStore::for_config_root(config_root),
            assets: Box::new(EmbeddedAssets),
            names: None,
            log,
        }
    }

    /// Use `names` instead of the dictionary.
    #[must_use]
    pub fn with_names(mut self, names: impl NameSource + 'a) -> Self {
        self.names = Some(Box::new(names));
        self
    }

    /// Use `assets` instead of the embedded set.
    #[must_use]
    pub fn with_assets(mut self, assets: impl AssetSource + 'a) -> Self {
        self.assets = Box::new(assets);
        self
    }

    /// Paths managed inside the repository.
    #[must_use]
    pub const fn layout(&self) -> &PrivateAreaLayout {
        &self.layout
    }

    /// The external store folders are reserved in.
    #[must_use]
    pub const fn store(&self) -> &ExternalStore {
        &self.store
    }

    /// Create whatever part of the private area is missing.
    ///
    /// # Errors
    ///
    /// Stops at the first step that fails: a managed path holding the wrong
    /// kind of entry, a missing bundled asset, an unreadable or corrupt
    /// config, a failed reservation, or any I/O error.
    pub fn init(&self) -> Result<Provisioned> {
        let mut changes = Vec::with_capacity(4);

        self.log.stage("Provisioning private area");
        self.log
            .debug(&format!("private area: {}", self.layout.base_dir.display()));

        let change = self.step(Step::BaseDirectory, &self.layout.base_dir, || {
            resources::ensure_directory(&self.layout.base_dir, BASE_DIR_MODE)
        })?;
        changes.push((Step::BaseDirectory, change));

        let change = self.step(Step::IgnoreFile, &self.layout.gitignore_path, || {
            resources::ensure_file(&self.layout.gitignore_path, |path| {
                assets::copy_asset(self.assets.as_ref(), assets::GITIGNORE, path)
            })
        })?;
        changes.push((Step::IgnoreFile, change));

        let change = self.step(Step::FolderConfig, &self.layout.config_path, || {
            resources::ensure_file(&self.layout.config_path, |path| {
                let name = self.reserve()?;
                self.log.info(&format!("reserved folder {name}"));
                config::save(path, &FolderConfig::new(name))
            })
        })?;
        changes.push((Step::FolderConfig, change));

        let config = config::load(&self.layout.config_path)?;
        let target = self.store.folder(&config.folder_name);
        self.log.debug(&format!("external folder: {}", target.display()));

        let change = self.step(Step::Link, &self.layout.local_link_path, || {
            resources::ensure_symlink_directory(&self.layout.local_link_path, |link| {
                self.restore_target(&target)?;
                create_symlink(&target, link)
            })
        })?;
        changes.push((Step::Link, change));

        if change == ResourceChange::AlreadyCorrect {
            self.warn_if_relinked(&target);
        }

        Ok(Provisioned {
            folder_name: config.folder_name,
            target,
            changes,
        })
    }

    fn reserve(&self) -> Result<String> {
        match &self.names {
            Some(names) => reservation::reserve(&self.store, names.as_ref(), self.log),
            None => {
                let names = WordListNames::from_assets(self.assets.as_ref())?;
                reservation::reserve(&self.store, &names, self.log)
            }
        }
    }

    /// Ensure the configured folder exists before a link to it is created.
    /// A fresh clone has the config but not the folder; it is recreated
    /// under the recorded name.
    fn restore_target(&self, target: &Path) -> Result<()> {
        let change = resources::ensure_directory(target, reservation::PRIVATE_MODE)?;
        if change == ResourceChange::Applied {
            self.log
                .info(&format!("recreated external folder {}", target.display()));
        }
        Ok(())
    }

    /// Run one step and record its outcome for the summary.
    fn step<F>(&self, step: Step, path: &Path, run: F) -> Result<ResourceChange>
    where
        F: FnOnce() -> Result<ResourceChange>,
    {
        let name = step.to_string();
        match run() {
            Ok(change) => {
                self.log
                    .debug(&format!("{name}: {change} at {}", path.display()));
                self.log.record_step(&name, change.into(), None);
                Ok(change)
            }
            Err(e) => {
                self.log
                    .record_step(&name, StepStatus::Failed, Some(&e.to_string()));
                Err(e)
            }
        }
    }

    /// Existing links are never rewritten, but one that points somewhere
    /// other than the configured folder is worth a warning.
    fn warn_if_relinked(&self, target: &Path) {
        let link = &self.layout.local_link_path;
        match std::fs::read_link(link) {
            Ok(current) if current != target => self.log.warn(&format!(
                "{} points to {}, not the configured {}",
                link.display(),
                current.display(),
                target.display()
            )),
            Ok(_) => {}
            Err(e) => self
                .log
                .debug(&format!("cannot read {}: {e}", link.display())),
        }
    }
}
