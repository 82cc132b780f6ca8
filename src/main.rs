//! # cloudctl
//!
//! Command-line client for the cloud API.
//!
//! ## Quick Start
//!
//! ```bash
//! # Point cloudctl at an API
//! cloudctl context set prod --url https://api.example.com --token "$TOKEN"
//! cloudctl context use prod
//!
//! # Create a gateway with two pipes
//! cloudctl gateway create --name edge --project p1 \
//!     --pipes "web:8080:web.backend,db:5432:db.backend"
//!
//! # List S3 users of a partition as a table
//! cloudctl s3 list -p fra-equ01 -o table
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`; `--debug` turns
//! on request tracing.

use cloudctl::{commands, Cli};
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(debug: bool) {
    let default = if debug { "cloudctl=debug" } else { "cloudctl=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main entry point for cloudctl
///
/// Runs on a single-threaded runtime: a command issues at most one request
/// and waits for it before printing.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.debug);

    let Some(cmd) = cli.cmd else {
        eprintln!("No command provided. Use --help to see available commands.");
        return ExitCode::FAILURE;
    };

    match commands::run(cmd, &cli.global).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
