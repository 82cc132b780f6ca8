//! # cloudctl Library
//!
//! Core library functionality for the cloudctl command-line client.

use clap::{Args, Parser};

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod flags;
pub mod output;

use output::OutputFormat;

/// Command-line client for the cloud API
///
/// Manages Kubernetes clusters, gateways, S3 users and Postgres databases.
/// Every command issues a single API call and prints the response.
#[derive(Parser)]
#[command(
    name = "cloudctl",
    version,
    about = "Command-line client for the cloud API",
    long_about = "Manage Kubernetes clusters, gateways, S3 object-storage users and managed Postgres databases.\n\nThe API endpoint and token are taken from --api-url/--api-token, their environment variables,\nor the selected context of the configuration file."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Option<commands::Commands>,
}

/// Flags accepted by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// API base URL, overrides the context
    #[arg(long, global = true, env = "CLOUDCTL_URL")]
    pub api_url: Option<String>,

    /// API bearer token, overrides the context
    #[arg(long, global = true, env = "CLOUDCTL_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Context from the configuration file to use
    #[arg(long, global = true, env = "CLOUDCTL_CONTEXT")]
    pub context: Option<String>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        env = "CLOUDCTL_OUTPUT",
        default_value_t = OutputFormat::Yaml
    )]
    pub output: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,
}
