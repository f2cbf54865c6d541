//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Version reported by `--version` and in the log header.
pub const VERSION: &str = match option_env!("PRIVATE_FOLDER_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Top-level CLI entry point for private-folder.
#[derive(Parser, Debug)]
#[command(
    name = "private-folder",
    about = "Link an ignored .private/files directory to per-machine storage",
    version = VERSION
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Start repository discovery from DIR instead of the current directory
    #[arg(short = 'C', long, value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the private area of the enclosing repository
    Init(InitOpts),
}

impl Command {
    /// Name used for the log file of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
        }
    }
}

/// Options for the `init` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InitOpts {}
