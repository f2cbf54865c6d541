//! Private folder provisioning.
//!
//! Sets up `.private/` inside a git working tree: an ignore file, a
//! persisted config naming an external folder, and a `files` symlink into
//! that folder under the per-user config directory. Running it again is
//! always safe.
//!
//! The public API is organised into layers:
//!
//! - **[`resources`]**: idempotent `check + apply` filesystem primitives
//! - **[`assets`]**, **[`names`]**, **[`config`]**: the collaborators a run needs
//! - **[`provision`]**: the ordered `init` procedure
//! - **[`commands`]**: subcommand orchestration behind the CLI
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod assets;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod names;
pub mod platform;
pub mod provision;
pub mod repository;
pub mod resources;
