//! Shotpath CLI - schema-driven path templates
//!
//! Main entry point for the `shotpath` binary.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging is best-effort; the tool stays usable without it.
    if let Err(e) = shotpath_log::init(shotpath_log::LogConfig::from_env()) {
        eprintln!("warning: {e}");
    }

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
