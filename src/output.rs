//! Rendering of API responses
//!
//! Responses are printed as YAML (the default), pretty JSON or a table.
//! Tables only show the columns a type declares through [`Tabular`]; the
//! structured formats print everything the server returned.

use crate::api::cluster::{ClusterConstraints, ClusterResponse, Machine};
use crate::api::database::{PostgresPartitions, PostgresResponse, PostgresVersion};
use crate::api::gateway::GatewayResponse;
use crate::api::project::Project;
use crate::api::s3::{S3Partition, S3Response};
use crate::error::RenderError;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    Table,
}

/// Types that can be laid out as table rows.
pub trait Tabular {
    fn header() -> Vec<&'static str>;
    fn rows(&self) -> Vec<Vec<String>>;
}

impl<T: Tabular> Tabular for Vec<T> {
    fn header() -> Vec<&'static str> {
        T::header()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter().flat_map(|item| item.rows()).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    pub format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Printer { format }
    }

    pub fn print<W, T>(&self, out: &mut W, value: &T) -> Result<(), RenderError>
    where
        W: Write,
        T: Serialize + Tabular,
    {
        match self.format {
            OutputFormat::Yaml => {
                // serde_yaml emits a trailing newline already
                let data = serde_yaml::to_string(value)?;
                out.write_all(data.as_bytes())?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, value)?;
                writeln!(out)?;
            }
            OutputFormat::Table => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(T::header());
                for row in value.rows() {
                    table.add_row(row);
                }
                writeln!(out, "{table}")?;
            }
        }
        Ok(())
    }
}

fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

impl Tabular for ClusterResponse {
    fn header() -> Vec<&'static str> {
        vec!["ID", "NAME", "PROJECT", "TENANT", "PARTITION", "VERSION"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let version = self
            .kubernetes
            .as_ref()
            .map_or("-".to_string(), |k| or_dash(&k.version));
        vec![vec![
            self.id.clone(),
            or_dash(&self.name),
            or_dash(&self.project_id),
            or_dash(&self.tenant),
            or_dash(&self.partition_id),
            version,
        ]]
    }
}

impl Tabular for Machine {
    fn header() -> Vec<&'static str> {
        vec!["ID", "HOSTNAME"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.id.clone(),
            self.hostname.clone().unwrap_or_else(|| "-".to_string()),
        ]]
    }
}

impl Tabular for ClusterConstraints {
    fn header() -> Vec<&'static str> {
        vec!["CONSTRAINT", "VALUES"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let images: Vec<String> = self
            .machine_images
            .iter()
            .map(|i| format!("{}-{}", i.name, i.version))
            .collect();
        vec![
            vec!["partitions".to_string(), self.partitions.join(", ")],
            vec!["networks".to_string(), self.networks.join(", ")],
            vec![
                "kubernetes versions".to_string(),
                self.kubernetes_versions.join(", "),
            ],
            vec!["machine types".to_string(), self.machine_types.join(", ")],
            vec!["machine images".to_string(), images.join(", ")],
            vec!["firewall types".to_string(), self.firewall_types.join(", ")],
            vec!["firewall images".to_string(), self.firewall_images.join(", ")],
        ]
    }
}

impl Tabular for GatewayResponse {
    fn header() -> Vec<&'static str> {
        vec!["UID", "NAME", "PROJECT", "PIPES"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let pipes: Vec<String> = self
            .pipes
            .iter()
            .map(|p| format!("{}:{}:{}", p.name, p.port, p.remote))
            .collect();
        vec![vec![
            or_dash(&self.uid),
            or_dash(&self.name),
            or_dash(&self.project_uid),
            pipes.join("\n"),
        ]]
    }
}

impl Tabular for S3Response {
    fn header() -> Vec<&'static str> {
        vec!["ID", "NAME", "PARTITION", "TENANT", "PROJECT", "KEYS"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.id.clone(),
            or_dash(&self.name),
            or_dash(&self.partition),
            or_dash(&self.tenant),
            or_dash(&self.project),
            self.keys.len().to_string(),
        ]]
    }
}

impl Tabular for S3Partition {
    fn header() -> Vec<&'static str> {
        vec!["ID", "ENDPOINT"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.id.clone(),
            self.endpoint.clone().unwrap_or_else(|| "-".to_string()),
        ]]
    }
}

impl Tabular for PostgresResponse {
    fn header() -> Vec<&'static str> {
        vec!["ID", "DESCRIPTION", "PROJECT", "PARTITION", "VERSION", "CPU", "STORAGE"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let (cpu, storage) = match &self.size {
            Some(s) => (or_dash(&s.cpu), or_dash(&s.storage_size)),
            None => ("-".to_string(), "-".to_string()),
        };
        vec![vec![
            self.id.clone(),
            or_dash(&self.description),
            or_dash(&self.project_id),
            or_dash(&self.partition_id),
            or_dash(&self.version),
            cpu,
            storage,
        ]]
    }
}

impl Tabular for PostgresVersion {
    fn header() -> Vec<&'static str> {
        vec!["VERSION"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![self.version.clone()]]
    }
}

impl Tabular for PostgresPartitions {
    fn header() -> Vec<&'static str> {
        vec!["PARTITION"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.keys().map(|k| vec![k.clone()]).collect()
    }
}

impl Tabular for Project {
    fn header() -> Vec<&'static str> {
        vec!["ID", "NAME", "TENANT", "DESCRIPTION"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.meta.id.clone(),
            or_dash(&self.name),
            or_dash(&self.tenant_id),
            or_dash(&self.description),
        ]]
    }
}
