use super::Session;
use crate::api::s3::{
    S3CreateRequest, S3DeleteRequest, S3Key, S3ListRequest, S3Response, S3UpdateRequest,
    S3UserRef,
};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum S3Commands {
    /// Create an S3 user
    Create(S3CreateArgs),
    /// List S3 users
    #[command(alias = "ls")]
    List(S3ListArgs),
    /// Describe an S3 user
    Describe(S3UserArgs),
    /// Delete an S3 user
    #[command(aliases = ["rm", "delete"])]
    Remove {
        #[command(flatten)]
        user: S3UserArgs,
        /// Delete the user together with its buckets and objects (dangerous!)
        #[arg(long)]
        force: bool,
    },
    /// List S3 partitions
    #[command(alias = "partition")]
    Partitions,
    /// Add a key to an S3 user
    AddKey {
        #[command(flatten)]
        user: S3UserArgs,
        /// Access key, generated by the server if omitted
        #[arg(long)]
        access_key: Option<String>,
        /// Secret key, generated by the server if omitted
        #[arg(long)]
        secret_key: Option<String>,
    },
    /// Remove a key of an S3 user
    RemoveKey {
        #[command(flatten)]
        user: S3UserArgs,
        /// Access key of the access/secret key pair to remove
        #[arg(long)]
        access_key: String,
    },
}

/// Flags identifying one S3 user.
#[derive(Args, Debug, Clone)]
pub struct S3UserArgs {
    /// Id of the S3 user
    #[arg(short, long)]
    pub id: String,
    /// Name of the S3 partition the user is in
    #[arg(short, long)]
    pub partition: String,
    /// Id of the project that the S3 user belongs to
    #[arg(long)]
    pub project: String,
    /// Tenant of the S3 user, defaults to the logged in tenant
    #[arg(short, long, default_value = "")]
    pub tenant: String,
}

impl S3UserArgs {
    fn to_ref(&self) -> S3UserRef {
        S3UserRef {
            id: self.id.clone(),
            partition: self.partition.clone(),
            tenant: self.tenant.clone(),
            project: self.project.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct S3CreateArgs {
    #[command(flatten)]
    pub user: S3UserArgs,
    /// Name of the S3 user, only for display
    #[arg(short, long, default_value = "")]
    pub name: String,
    /// Maximum number of buckets for the S3 user
    #[arg(long, default_value_t = 0)]
    pub max_buckets: i64,
    /// Access key, generated by the server if omitted
    #[arg(long)]
    pub access_key: Option<String>,
    /// Secret key, generated by the server if omitted
    #[arg(long)]
    pub secret_key: Option<String>,
}

impl S3CreateArgs {
    pub fn to_request(&self) -> S3CreateRequest {
        let key = self.access_key.as_ref().map(|access_key| S3Key {
            access_key: access_key.clone(),
            secret_key: self.secret_key.clone().unwrap_or_default(),
        });
        S3CreateRequest {
            user: self.user.to_ref(),
            name: self.name.clone(),
            max_buckets: self.max_buckets,
            key,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct S3ListArgs {
    /// Name of the S3 partition
    #[arg(short, long, default_value = "")]
    pub partition: String,
    /// Only show users of this project
    #[arg(long)]
    pub project: Option<String>,
}

/// The API cannot filter by project, so the list is narrowed here.
pub fn filter_by_project(users: Vec<S3Response>, project: Option<&str>) -> Vec<S3Response> {
    match project {
        Some(p) if !p.is_empty() => users.into_iter().filter(|u| u.project == p).collect(),
        _ => users,
    }
}

pub async fn run<W, F>(cmd: S3Commands, connect: F, out: &mut W) -> Result<()>
where
    W: Write,
    F: FnOnce() -> Result<Session>,
{
    let session = connect()?;
    let client = &session.client;
    match cmd {
        S3Commands::Create(args) => {
            let user = client
                .create_s3(&args.to_request())
                .await
                .with_context(|| format!("failed to create s3 user '{}'", args.user.id))?;
            session.print(out, &user)
        }
        S3Commands::List(args) => {
            let req = S3ListRequest {
                partition: args.partition.clone(),
            };
            let users = client
                .list_s3(&req)
                .await
                .context("failed to list s3 users")?;
            session.print(out, &filter_by_project(users, args.project.as_deref()))
        }
        S3Commands::Describe(user) => {
            let resp = client
                .get_s3(&user.to_ref())
                .await
                .with_context(|| format!("failed to describe s3 user '{}'", user.id))?;
            session.print(out, &resp)
        }
        S3Commands::Remove { user, force } => {
            let req = S3DeleteRequest {
                user: user.to_ref(),
                force,
            };
            let resp = client
                .delete_s3(&req)
                .await
                .with_context(|| format!("failed to delete s3 user '{}'", user.id))?;
            session.print(out, &resp)
        }
        S3Commands::Partitions => {
            let partitions = client
                .list_s3_partitions()
                .await
                .context("failed to list s3 partitions")?;
            session.print(out, &partitions)
        }
        S3Commands::AddKey {
            user,
            access_key,
            secret_key,
        } => {
            let req = S3UpdateRequest {
                user: user.to_ref(),
                add_keys: vec![S3Key {
                    access_key: access_key.unwrap_or_default(),
                    secret_key: secret_key.unwrap_or_default(),
                }],
                remove_access_keys: vec![],
            };
            let resp = client
                .update_s3(&req)
                .await
                .with_context(|| format!("failed to add key to s3 user '{}'", user.id))?;
            session.print(out, &resp)
        }
        S3Commands::RemoveKey { user, access_key } => {
            let req = S3UpdateRequest {
                user: user.to_ref(),
                add_keys: vec![],
                remove_access_keys: vec![access_key],
            };
            let resp = client
                .update_s3(&req)
                .await
                .with_context(|| format!("failed to remove key of s3 user '{}'", user.id))?;
            session.print(out, &resp)
        }
    }
}
