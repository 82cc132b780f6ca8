//! Dynamic completion values
//!
//! `cloudctl __complete <kind> [arg]` prints one suggestion per line for
//! shells that want live values (cluster ids, partitions, versions, ...).
//! Completion must never break the shell: if the endpoint cannot be resolved
//! or the API call fails, nothing is printed and the command still succeeds.

use super::Session;
use crate::api::CloudClient;
use crate::config::{config_path, load_config};
use crate::error::ApiError;
use crate::GlobalArgs;
use anyhow::Result;
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompletionKind {
    Contexts,
    Clusters,
    /// Machines of the cluster given as argument
    ClusterMachines,
    Projects,
    Partitions,
    Networks,
    Versions,
    MachineTypes,
    MachineImages,
    FirewallTypes,
    FirewallImages,
    S3Partitions,
    PostgresPartitions,
    PostgresVersions,
}

impl CompletionKind {
    /// Name of the kind on the `__complete` command line.
    pub fn name(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }
}

/// An argument whose values are served by `__complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueSource {
    /// Subcommand words leading to the argument, empty for global flags
    pub path: &'static str,
    /// Flags taking the value; empty for the first positional argument
    pub flags: &'static [&'static str],
    pub kind: CompletionKind,
}

fn source(
    path: &'static str,
    flags: &'static [&'static str],
    kind: CompletionKind,
) -> ValueSource {
    ValueSource { path, flags, kind }
}

/// Every argument the shell scripts complete through `__complete`.
pub fn value_sources() -> Vec<ValueSource> {
    use CompletionKind::*;

    let mut sources = vec![
        source("", &["--context"], Contexts),
        source("cluster create", &["--project"], Projects),
        source("cluster create", &["--partition"], Partitions),
        source("cluster create", &["--version"], Versions),
        source("cluster create", &["--machine-type"], MachineTypes),
        source("cluster create", &["--machine-image"], MachineImages),
        source("cluster create", &["--networks"], Networks),
        source("cluster create", &["--firewall-type"], FirewallTypes),
        source("cluster create", &["--firewall-image"], FirewallImages),
        source("cluster update", &["--version"], Versions),
        source("gateway create", &["--project"], Projects),
        source("database postgres create", &["--project"], Projects),
        source("database postgres create", &["--partition"], PostgresPartitions),
        source("database postgres create", &["--version"], PostgresVersions),
    ];
    for path in ["cluster list", "cluster ls"] {
        sources.push(source(path, &["--project"], Projects));
        sources.push(source(path, &["--partition"], Partitions));
    }
    for path in [
        "cluster describe",
        "cluster remove",
        "cluster rm",
        "cluster delete",
        "cluster update",
        "cluster machines",
    ] {
        sources.push(source(path, &[], Clusters));
    }
    for path in [
        "s3 create",
        "s3 list",
        "s3 ls",
        "s3 describe",
        "s3 remove",
        "s3 rm",
        "s3 delete",
        "s3 add-key",
        "s3 remove-key",
    ] {
        sources.push(source(path, &["-p", "--partition"], S3Partitions));
        sources.push(source(path, &["--project"], Projects));
    }
    for path in ["context use", "context remove", "context rm", "context delete"] {
        sources.push(source(path, &[], Contexts));
    }
    sources
}

/// Query the API for the values of `kind`.
pub async fn suggestions(
    client: &CloudClient,
    kind: CompletionKind,
    arg: Option<&str>,
) -> Result<Vec<String>, ApiError> {
    let values = match kind {
        // served from the configuration file, see `run`
        CompletionKind::Contexts => Vec::new(),
        CompletionKind::Clusters => client
            .list_clusters()
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect(),
        CompletionKind::ClusterMachines => match arg {
            Some(id) => client
                .find_cluster(id)
                .await?
                .machines
                .into_iter()
                .map(|m| m.id)
                .collect(),
            None => Vec::new(),
        },
        CompletionKind::Projects => client
            .list_projects()
            .await?
            .into_iter()
            .map(|p| p.meta.id)
            .collect(),
        CompletionKind::Partitions => client.list_constraints().await?.partitions,
        CompletionKind::Networks => client.list_constraints().await?.networks,
        CompletionKind::Versions => client.list_constraints().await?.kubernetes_versions,
        CompletionKind::MachineTypes => client.list_constraints().await?.machine_types,
        CompletionKind::MachineImages => client
            .list_constraints()
            .await?
            .machine_images
            .into_iter()
            .map(|i| format!("{}-{}", i.name, i.version))
            .collect(),
        CompletionKind::FirewallTypes => client.list_constraints().await?.firewall_types,
        CompletionKind::FirewallImages => client.list_constraints().await?.firewall_images,
        CompletionKind::S3Partitions => client
            .list_s3_partitions()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect(),
        CompletionKind::PostgresPartitions => {
            client.postgres_partitions().await?.into_keys().collect()
        }
        CompletionKind::PostgresVersions => client
            .postgres_versions()
            .await?
            .into_iter()
            .map(|v| v.version)
            .collect(),
    };
    Ok(values)
}

pub async fn run<W: Write>(
    kind: CompletionKind,
    arg: Option<&str>,
    global: &GlobalArgs,
    out: &mut W,
) -> Result<()> {
    let values = if kind == CompletionKind::Contexts {
        match load_config(&config_path()) {
            Ok(cfg) => cfg.contexts.into_keys().collect(),
            Err(e) => {
                tracing::debug!(error = %e, "no context completion");
                Vec::new()
            }
        }
    } else {
        match Session::from_args(global) {
            Ok(session) => match suggestions(&session.client, kind, arg).await {
                Ok(values) => values,
                Err(e) => {
                    tracing::debug!(error = %e, ?kind, "completion query failed");
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "no API endpoint for completion");
                Vec::new()
            }
        }
    };

    for value in values {
        writeln!(out, "{value}")?;
    }
    Ok(())
}
