//! `private-folder` command-line entry point.
use std::process::ExitCode;

use clap::Parser;

use private_folder::cli::{Cli, Command};
use private_folder::commands;
use private_folder::logging::{self, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose, args.command.name());
    let log = Logger::new();

    let result = match args.command {
        Command::Init(ref opts) => commands::init::run(&args.global, opts, &log),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
