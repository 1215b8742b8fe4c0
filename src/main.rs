//! Stackgen: static generator for AI agent stack templates and demos.
//!
//! This is the main entry point for the `stackgen` CLI. It parses
//! arguments, dispatches to the appropriate command handler, and maps
//! errors to exit codes.

mod cli;
mod commands;
pub mod emit;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod generate;
pub mod manifest;
pub mod names;
pub mod repair;
pub mod spec;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
