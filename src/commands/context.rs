use crate::config::{load_config, save_config, ContextConfig};
use anyhow::{anyhow, Result};
use clap::Subcommand;
use dialoguer::Select;
use std::io::Write;
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum ContextCommands {
    /// List all contexts
    #[command(alias = "ls")]
    List,
    /// Add or replace a context
    Set {
        name: String,
        /// API base URL
        #[arg(long)]
        url: String,
        /// API token, may be a ${VAR} placeholder
        #[arg(long)]
        token: Option<String>,
    },
    /// Switch the current context (prompts when no name is given)
    Use { name: Option<String> },
    /// Remove a context by name
    #[command(aliases = ["rm", "delete"])]
    Remove { name: String },
}

pub fn run<W: Write>(cmd: ContextCommands, path: &Path, out: &mut W) -> Result<()> {
    let mut cfg = load_config(path)?;

    match cmd {
        ContextCommands::List => {
            if cfg.contexts.is_empty() {
                writeln!(out, "(no contexts defined)")?;
            } else {
                for (name, ctx) in &cfg.contexts {
                    let marker = if cfg.current_context.as_deref() == Some(name.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    writeln!(out, "{marker} {name} → {}", ctx.url)?;
                }
            }
        }
        ContextCommands::Set { name, url, token } => {
            cfg.contexts.insert(name.clone(), ContextConfig { url, token });
            if cfg.current_context.is_none() {
                cfg.current_context = Some(name.clone());
            }
            save_config(&cfg, path)?;
            writeln!(out, "context '{name}' saved")?;
        }
        ContextCommands::Use { name } => {
            let name = match name {
                Some(n) => n,
                None => {
                    let names: Vec<&String> = cfg.contexts.keys().collect();
                    if names.is_empty() {
                        return Err(anyhow!("no contexts defined, add one with 'context set'"));
                    }
                    let current = cfg
                        .current_context
                        .as_ref()
                        .and_then(|c| names.iter().position(|n| *n == c))
                        .unwrap_or(0);
                    let selection = Select::new()
                        .with_prompt("Context")
                        .items(&names)
                        .default(current)
                        .interact()?;
                    names[selection].clone()
                }
            };
            if !cfg.contexts.contains_key(&name) {
                return Err(anyhow!("no such context '{}'", name));
            }
            cfg.current_context = Some(name.clone());
            save_config(&cfg, path)?;
            writeln!(out, "switched to context '{name}'")?;
        }
        ContextCommands::Remove { name } => {
            if cfg.contexts.remove(&name).is_none() {
                writeln!(out, "no such context '{name}'")?;
            } else {
                if cfg.current_context.as_deref() == Some(name.as_str()) {
                    cfg.current_context = None;
                }
                save_config(&cfg, path)?;
                writeln!(out, "removed '{name}'")?;
            }
        }
    }

    Ok(())
}
