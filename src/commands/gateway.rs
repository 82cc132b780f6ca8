use super::Session;
use crate::api::gateway::GatewayCreateRequest;
use crate::flags::parse_pipes;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum GatewayCommands {
    /// Create a gateway
    Create(GatewayCreateArgs),
    /// List gateways
    #[command(alias = "ls")]
    List,
    /// Describe a gateway
    Describe { id: String },
    /// Delete a gateway
    #[command(aliases = ["rm", "delete"])]
    Remove { id: String },
}

#[derive(Args, Debug, Clone)]
pub struct GatewayCreateArgs {
    /// Name of the gateway
    #[arg(long)]
    pub name: String,
    /// Project-UID which the gateway belongs to
    #[arg(long)]
    pub project: String,
    /// Comma-separated list of pipes (e.g. PIPE_1,PIPE_2), each of the form
    /// NAME:PORT:REMOTE (service name, client pod port, remote service endpoint)
    #[arg(long)]
    pub pipes: String,
}

impl GatewayCreateArgs {
    /// Assemble the request; fails on a malformed `--pipes` value before
    /// anything is sent.
    pub fn to_request(&self) -> Result<GatewayCreateRequest> {
        let pipes = parse_pipes(&self.pipes)?;
        Ok(GatewayCreateRequest {
            project_uid: self.project.clone(),
            name: self.name.clone(),
            pipes,
        })
    }
}

pub async fn run<W, F>(cmd: GatewayCommands, connect: F, out: &mut W) -> Result<()>
where
    W: Write,
    F: FnOnce() -> Result<Session>,
{
    match cmd {
        GatewayCommands::Create(args) => {
            let req = args.to_request()?;
            let session = connect()?;
            tracing::debug!(name = %req.name, pipes = req.pipes.len(), "creating gateway");
            let gw = session
                .client
                .create_gateway(&req)
                .await
                .with_context(|| format!("failed to create gateway '{}'", req.name))?;
            session.print(out, &gw)
        }
        GatewayCommands::List => {
            let session = connect()?;
            let gws = session
                .client
                .list_gateways()
                .await
                .context("failed to list gateways")?;
            session.print(out, &gws)
        }
        GatewayCommands::Describe { id } => {
            let session = connect()?;
            let gw = session
                .client
                .find_gateway(&id)
                .await
                .with_context(|| format!("failed to describe gateway '{id}'"))?;
            session.print(out, &gw)
        }
        GatewayCommands::Remove { id } => {
            let session = connect()?;
            let gw = session
                .client
                .delete_gateway(&id)
                .await
                .with_context(|| format!("failed to delete gateway '{id}'"))?;
            session.print(out, &gw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pipes: &str) -> GatewayCreateArgs {
        GatewayCreateArgs {
            name: "edge".to_string(),
            project: "p1".to_string(),
            pipes: pipes.to_string(),
        }
    }

    #[test]
    fn test_request_keeps_pipe_order() {
        let req = args("b:2:y,a:1:x").to_request().unwrap();
        assert_eq!(req.project_uid, "p1");
        let names: Vec<_> = req.pipes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_request_rejects_bad_pipes() {
        let err = args("a:1:x,b:70000:y").to_request().unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("element 1"), "{msg}");
        assert!(msg.contains("out of range"), "{msg}");
    }
}
