//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `relaunch_audit` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use relaunch_audit::initialization::init_logger_with;
use relaunch_audit::{run_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = run_server(config).await {
        eprintln!("relaunch_audit error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
