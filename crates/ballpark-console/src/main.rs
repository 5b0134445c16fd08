//! Ballpark admin console
//!
//! Command line front end for user, comment, community and inquiry management.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use ballpark_console::cli::Cli;
use ballpark_console::{Outcome, Result, commands};
use ballpark_core::Config;
use clap::Parser;
use std::process::ExitCode;
use tracing::info;

/// Main entry point
///
/// # Errors
///
/// Returns error if configuration, logging or the HTTP client cannot be set up
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply_overrides(&mut config);

    // Held until exit so the file writer flushes
    let _log_guard = ballpark_core::init_logging(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        resync = ?config.console.resync,
        "Ballpark admin console starting"
    );

    let outcome = commands::run(cli.command, config).await?;
    Ok(exit_code(outcome))
}

/// Map an action outcome to the process exit status
const fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Done | Outcome::Cancelled => ExitCode::SUCCESS,
        Outcome::Failed | Outcome::Partial { .. } => ExitCode::FAILURE,
    }
}
