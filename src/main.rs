//! @dose
//! purpose: CLI entry point for gocopycat. Parses arguments, sets up logging and
//!     hands off to the copy command.
//!
//! invariants:
//!     - The process exits with 0 on success, 1 on any error
//!     - Logs go to stderr so stdout carries nothing but Go source
//!
//! gotchas:
//!     - RUST_LOG overrides the level chosen by --verbose

use anyhow::Context;
use clap::Parser;
use gocopycat::cli::Cli;
use gocopycat::commands::run_copy;
use std::env;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = env::current_dir().context("Failed to get current directory")?;
    run_copy(&cli.copy, &cwd)
}

/// RUST_LOG wins; otherwise --verbose selects debug and the default is warn.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
