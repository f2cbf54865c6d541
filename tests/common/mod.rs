// Shared helpers for integration tests.
//
// Provides a temporary git working tree paired with a temporary per-user
// config root, so each test provisions an isolated private area without
// touching the real home directory.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use private_folder::logging::Logger;
use private_folder::names::ScriptedNames;
use private_folder::provision::{PrivateAreaLayout, Provisioner};
use private_folder::repository::{self, RepositoryContext};

/// A git working tree and a config root, both backed by
/// [`tempfile::TempDir`] and deleted on drop.
pub struct TestRepo {
    /// Temporary directory holding the working tree.
    pub work: tempfile::TempDir,
    /// Temporary directory standing in for the per-user config root.
    pub config_root: tempfile::TempDir,
    /// The discovered repository.
    pub repo: RepositoryContext,
}

impl TestRepo {
    /// Initialise a repository with its own config root.
    pub fn new() -> Self {
        let work = tempfile::tempdir().expect("create work dir");
        let config_root = tempfile::tempdir().expect("create config root");
        git2::Repository::init(work.path()).expect("git init");
        let repo = repository::discover(work.path()).expect("discover repository");
        Self {
            work,
            config_root,
            repo,
        }
    }

    /// Working-tree root as resolved by discovery.
    pub fn root(&self) -> &Path {
        self.repo.root()
    }

    /// Paths of the private area in this repository.
    pub fn layout(&self) -> PrivateAreaLayout {
        PrivateAreaLayout::for_repository(&self.repo)
    }

    /// Store directory under the config root.
    pub fn store_root(&self) -> PathBuf {
        self.config_root.path().join("private-folder")
    }

    /// Provisioner using the dictionary for names.
    pub fn provisioner<'a>(&self, log: &'a Logger) -> Provisioner<'a> {
        Provisioner::new(&self.repo, self.config_root.path(), log)
    }

    /// Provisioner drawing names from `names` in order.
    pub fn scripted<'a>(&self, log: &'a Logger, names: &[&str]) -> Provisioner<'a> {
        self.provisioner(log)
            .with_names(ScriptedNames::new(names.iter().copied()))
    }

    /// Read `.private/config.toml`.
    pub fn config_text(&self) -> String {
        std::fs::read_to_string(self.layout().config_path).expect("read config")
    }

    /// Names of the folders currently in the store, sorted.
    pub fn store_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.store_root())
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}
