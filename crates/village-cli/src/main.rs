#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;

use std::process;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "village_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "village_cli::config";
pub const TRACING_TARGET_SESSION: &str = "village_cli::session";
pub const TRACING_TARGET_COMMAND: &str = "village_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            error = %format!("{error:#}"),
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let client = cli.create_client()?;
    let name = cli.command.name();

    tracing::debug!(target: TRACING_TARGET_COMMAND, command = name, "Running command");
    cli.command.execute(&client).await
}
