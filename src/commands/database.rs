use super::Session;
use crate::api::database::{PostgresAccessList, PostgresCreateRequest, PostgresSize};
use crate::flags::parse_labels;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum DatabaseCommands {
    /// Manage Postgres databases
    Postgres {
        #[command(subcommand)]
        cmd: PostgresCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum PostgresCommands {
    /// Create a Postgres database
    Create(PostgresCreateArgs),
    /// List Postgres databases
    #[command(alias = "ls")]
    List,
    /// Describe a Postgres database
    Describe { id: String },
    /// Delete a Postgres database
    #[command(aliases = ["rm", "delete"])]
    Remove { id: String },
    /// List partitions Postgres databases can be created in
    Partitions,
    /// List available Postgres versions
    Versions,
}

#[derive(Args, Debug, Clone)]
pub struct PostgresCreateArgs {
    /// Description of the database
    #[arg(long)]
    pub description: String,
    /// Project the database belongs to
    #[arg(long)]
    pub project: String,
    /// Partition to create the database in
    #[arg(long)]
    pub partition: String,
    /// Postgres version
    #[arg(long)]
    pub version: String,
    /// Number of replicas
    #[arg(long, default_value_t = 1)]
    pub replicas: u32,
    /// Requested CPU
    #[arg(long, default_value = "500m")]
    pub cpu: String,
    /// Requested storage
    #[arg(long, default_value = "10Gi")]
    pub storage: String,
    /// Networks allowed to connect, comma-separated CIDRs
    #[arg(long, value_delimiter = ',', default_value = "0.0.0.0/0")]
    pub source_ranges: Vec<String>,
    /// Maintenance windows, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub maintenance: Vec<String>,
    /// Labels as KEY=VALUE, comma-separated
    #[arg(long)]
    pub labels: Option<String>,
}

impl PostgresCreateArgs {
    pub fn to_request(&self) -> Result<PostgresCreateRequest> {
        let labels: BTreeMap<String, String> = match &self.labels {
            Some(raw) => parse_labels(raw)?
                .into_iter()
                .map(|l| (l.key, l.value))
                .collect(),
            None => BTreeMap::new(),
        };
        Ok(PostgresCreateRequest {
            description: self.description.clone(),
            project_id: self.project.clone(),
            partition_id: self.partition.clone(),
            version: self.version.clone(),
            number_of_instances: self.replicas,
            size: PostgresSize {
                cpu: self.cpu.clone(),
                storage_size: self.storage.clone(),
            },
            access_list: PostgresAccessList {
                source_ranges: self.source_ranges.clone(),
            },
            maintenance: self.maintenance.clone(),
            labels,
        })
    }
}

pub async fn run<W, F>(cmd: DatabaseCommands, connect: F, out: &mut W) -> Result<()>
where
    W: Write,
    F: FnOnce() -> Result<Session>,
{
    let DatabaseCommands::Postgres { cmd } = cmd;
    match cmd {
        PostgresCommands::Create(args) => {
            let req = args.to_request()?;
            let session = connect()?;
            let pg = session
                .client
                .create_postgres(&req)
                .await
                .context("failed to create postgres database")?;
            session.print(out, &pg)
        }
        PostgresCommands::List => {
            let session = connect()?;
            let pgs = session
                .client
                .list_postgres()
                .await
                .context("failed to list postgres databases")?;
            session.print(out, &pgs)
        }
        PostgresCommands::Describe { id } => {
            let session = connect()?;
            let pg = session
                .client
                .find_postgres(&id)
                .await
                .with_context(|| format!("failed to describe postgres database '{id}'"))?;
            session.print(out, &pg)
        }
        PostgresCommands::Remove { id } => {
            let session = connect()?;
            let pg = session
                .client
                .delete_postgres(&id)
                .await
                .with_context(|| format!("failed to delete postgres database '{id}'"))?;
            session.print(out, &pg)
        }
        PostgresCommands::Partitions => {
            let session = connect()?;
            let partitions = session
                .client
                .postgres_partitions()
                .await
                .context("failed to list postgres partitions")?;
            session.print(out, &partitions)
        }
        PostgresCommands::Versions => {
            let session = connect()?;
            let versions = session
                .client
                .postgres_versions()
                .await
                .context("failed to list postgres versions")?;
            session.print(out, &versions)
        }
    }
}
