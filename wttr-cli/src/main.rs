//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Printing the report and choosing the exit code

use std::{io, process::ExitCode};

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wttr_core::Config;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();

    // Logs go to stderr so stdout only ever carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cmd.log_filter())),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let result: anyhow::Result<()> = async {
        let config = Config::load()?;
        debug!(?config, "loaded configuration");
        cmd.run(&config, &mut io::stdout()).await
    }
    .await;

    ExitCode::from(cli::report_outcome(&cmd.city(), &result, &mut io::stderr()))
}
