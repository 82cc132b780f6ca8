use super::Session;
use crate::api::cluster::{
    ClusterCreateRequest, ClusterResponse, ClusterUpdateRequest, Kubernetes, Worker,
};
use crate::flags::{parse_labels, Label};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum ClusterCommands {
    /// Create a cluster
    Create(ClusterCreateArgs),
    /// List clusters
    #[command(alias = "ls")]
    List(ClusterListArgs),
    /// Describe a cluster
    Describe { id: String },
    /// Delete a cluster
    #[command(aliases = ["rm", "delete"])]
    Remove { id: String },
    /// Update size, version or labels of a cluster
    Update(ClusterUpdateArgs),
    /// List the machines of a cluster
    Machines { id: String },
    /// Show the values accepted for cluster creation
    Inputs,
}

#[derive(Args, Debug, Clone)]
pub struct ClusterCreateArgs {
    /// Name of the cluster
    #[arg(long)]
    pub name: String,
    /// Description of the cluster
    #[arg(long)]
    pub description: Option<String>,
    /// Project the cluster belongs to
    #[arg(long)]
    pub project: String,
    /// Partition to create the cluster in
    #[arg(long)]
    pub partition: String,
    /// Kubernetes version
    #[arg(long)]
    pub version: String,
    /// Machine type of the workers
    #[arg(long)]
    pub machine_type: String,
    /// Machine image of the workers
    #[arg(long)]
    pub machine_image: String,
    /// Minimum number of workers
    #[arg(long, default_value_t = 1)]
    pub minsize: u32,
    /// Maximum number of workers
    #[arg(long, default_value_t = 1)]
    pub maxsize: u32,
    /// Additional networks, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub networks: Vec<String>,
    /// Firewall type
    #[arg(long)]
    pub firewall_type: Option<String>,
    /// Firewall image
    #[arg(long)]
    pub firewall_image: Option<String>,
    /// Labels as KEY=VALUE, comma-separated
    #[arg(long)]
    pub labels: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ClusterListArgs {
    /// Only show clusters of this project
    #[arg(long)]
    pub project: Option<String>,
    /// Only show clusters in this partition
    #[arg(long)]
    pub partition: Option<String>,
    /// Only show clusters with this name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ClusterUpdateArgs {
    pub id: String,
    /// New Kubernetes version
    #[arg(long)]
    pub version: Option<String>,
    /// New minimum number of workers
    #[arg(long)]
    pub minsize: Option<u32>,
    /// New maximum number of workers
    #[arg(long)]
    pub maxsize: Option<u32>,
    /// Replace labels, KEY=VALUE comma-separated
    #[arg(long)]
    pub labels: Option<String>,
}

fn label_map(labels: Vec<Label>) -> BTreeMap<String, String> {
    labels.into_iter().map(|l| (l.key, l.value)).collect()
}

impl ClusterCreateArgs {
    pub fn to_request(&self) -> Result<ClusterCreateRequest> {
        let labels = match &self.labels {
            Some(raw) => label_map(parse_labels(raw)?),
            None => BTreeMap::new(),
        };
        Ok(ClusterCreateRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            project_id: self.project.clone(),
            partition_id: self.partition.clone(),
            kubernetes: Kubernetes {
                version: self.version.clone(),
            },
            workers: vec![Worker {
                name: "default".to_string(),
                machine_type: self.machine_type.clone(),
                machine_image: self.machine_image.clone(),
                minsize: self.minsize,
                maxsize: self.maxsize,
            }],
            additional_networks: self.networks.clone(),
            firewall_type: self.firewall_type.clone(),
            firewall_image: self.firewall_image.clone(),
            labels,
        })
    }
}

impl ClusterUpdateArgs {
    pub fn to_request(&self) -> Result<ClusterUpdateRequest> {
        let labels = match &self.labels {
            Some(raw) => Some(label_map(parse_labels(raw)?)),
            None => None,
        };
        Ok(ClusterUpdateRequest {
            id: self.id.clone(),
            kubernetes: self.version.clone().map(|version| Kubernetes { version }),
            minsize: self.minsize,
            maxsize: self.maxsize,
            labels,
        })
    }
}

impl ClusterListArgs {
    pub fn matches(&self, c: &ClusterResponse) -> bool {
        self.project.as_ref().map_or(true, |p| *p == c.project_id)
            && self.partition.as_ref().map_or(true, |p| *p == c.partition_id)
            && self.name.as_ref().map_or(true, |n| *n == c.name)
    }
}

pub async fn run<W, F>(cmd: ClusterCommands, connect: F, out: &mut W) -> Result<()>
where
    W: Write,
    F: FnOnce() -> Result<Session>,
{
    match cmd {
        ClusterCommands::Create(args) => {
            let req = args.to_request()?;
            let session = connect()?;
            let cluster = session
                .client
                .create_cluster(&req)
                .await
                .with_context(|| format!("failed to create cluster '{}'", req.name))?;
            session.print(out, &cluster)
        }
        ClusterCommands::List(filter) => {
            let session = connect()?;
            let clusters = session
                .client
                .list_clusters()
                .await
                .context("failed to list clusters")?;
            let clusters: Vec<_> = clusters.into_iter().filter(|c| filter.matches(c)).collect();
            session.print(out, &clusters)
        }
        ClusterCommands::Describe { id } => {
            let session = connect()?;
            let cluster = session
                .client
                .find_cluster(&id)
                .await
                .with_context(|| format!("failed to describe cluster '{id}'"))?;
            session.print(out, &cluster)
        }
        ClusterCommands::Remove { id } => {
            let session = connect()?;
            let cluster = session
                .client
                .delete_cluster(&id)
                .await
                .with_context(|| format!("failed to delete cluster '{id}'"))?;
            session.print(out, &cluster)
        }
        ClusterCommands::Update(args) => {
            let req = args.to_request()?;
            let session = connect()?;
            let cluster = session
                .client
                .update_cluster(&req)
                .await
                .with_context(|| format!("failed to update cluster '{}'", req.id))?;
            session.print(out, &cluster)
        }
        ClusterCommands::Machines { id } => {
            let session = connect()?;
            let cluster = session
                .client
                .find_cluster(&id)
                .await
                .with_context(|| format!("failed to describe cluster '{id}'"))?;
            session.print(out, &cluster.machines)
        }
        ClusterCommands::Inputs => {
            let session = connect()?;
            let constraints = session
                .client
                .list_constraints()
                .await
                .context("failed to list cluster constraints")?;
            session.print(out, &constraints)
        }
    }
}
