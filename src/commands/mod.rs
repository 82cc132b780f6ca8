use crate::api::CloudClient;
use crate::config::{config_path, load_config};
use crate::output::{Printer, Tabular};
use crate::GlobalArgs;
use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use std::io::{self, Write};

pub mod cluster;
pub mod complete;
pub mod completions;
pub mod context;
pub mod database;
pub mod gateway;
pub mod project;
pub mod s3;

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Manage Kubernetes clusters")]
    Cluster {
        #[command(subcommand)]
        cmd: cluster::ClusterCommands,
    },
    #[command(about = "Manage gateways, which enable access to services in another cluster")]
    Gateway {
        #[command(subcommand)]
        cmd: gateway::GatewayCommands,
    },
    #[command(about = "Manage access to S3 storage located in different partitions")]
    S3 {
        #[command(subcommand)]
        cmd: s3::S3Commands,
    },
    #[command(about = "Manage managed databases")]
    Database {
        #[command(subcommand)]
        cmd: database::DatabaseCommands,
    },
    #[command(about = "Show projects")]
    Project {
        #[command(subcommand)]
        cmd: project::ProjectCommands,
    },
    #[command(about = "Manage API contexts in the configuration file (no network)")]
    Context {
        #[command(subcommand)]
        cmd: context::ContextCommands,
    },
    #[command(about = "Emit shell completion scripts (bash/zsh/fish)")]
    Completion { shell: String },
    #[command(name = "__complete", hide = true)]
    Complete {
        #[arg(value_enum)]
        kind: complete::CompletionKind,
        arg: Option<String>,
    },
}

/// Per-invocation handle passed to every handler that talks to the API.
pub struct Session {
    pub client: CloudClient,
    pub printer: Printer,
}

impl Session {
    /// Resolve the endpoint from flags, environment and configuration file.
    pub fn from_args(global: &GlobalArgs) -> Result<Self> {
        let cfg = load_config(&config_path())?;
        let ctx = cfg.resolve(
            global.context.as_deref(),
            global.api_url.as_deref(),
            global.api_token.as_deref(),
        )?;
        tracing::debug!(context = ?ctx.name, url = %ctx.url, "resolved API endpoint");
        Ok(Session {
            client: CloudClient::new(&ctx)?,
            printer: Printer::new(global.output),
        })
    }

    pub fn print<W, T>(&self, out: &mut W, value: &T) -> Result<()>
    where
        W: Write,
        T: Serialize + Tabular,
    {
        self.printer.print(out, value)?;
        Ok(())
    }
}

/// Dispatch a command.
///
/// API commands receive the session lazily and resolve it only after their
/// arguments have been validated, so a malformed flag is reported even when
/// no endpoint is configured.
pub async fn run(cmd: Commands, global: &GlobalArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let connect = || Session::from_args(global);
    match cmd {
        Commands::Context { cmd } => context::run(cmd, &config_path(), &mut stdout),
        Commands::Completion { shell } => completions::run(&shell, &mut stdout),
        Commands::Complete { kind, arg } => {
            complete::run(kind, arg.as_deref(), global, &mut stdout).await
        }
        Commands::Cluster { cmd } => cluster::run(cmd, connect, &mut stdout).await,
        Commands::Gateway { cmd } => gateway::run(cmd, connect, &mut stdout).await,
        Commands::S3 { cmd } => s3::run(cmd, connect, &mut stdout).await,
        Commands::Database { cmd } => database::run(cmd, connect, &mut stdout).await,
        Commands::Project { cmd } => project::run(cmd, connect, &mut stdout).await,
    }
}
