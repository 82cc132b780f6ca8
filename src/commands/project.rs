use super::Session;
use anyhow::{Context, Result};
use clap::Subcommand;
use std::io::Write;

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    #[command(alias = "ls")]
    List,
}

pub async fn run<W, F>(cmd: ProjectCommands, connect: F, out: &mut W) -> Result<()>
where
    W: Write,
    F: FnOnce() -> Result<Session>,
{
    match cmd {
        ProjectCommands::List => {
            let session = connect()?;
            let projects = session
                .client
                .list_projects()
                .await
                .context("failed to list projects")?;
            session.print(out, &projects)
        }
    }
}
