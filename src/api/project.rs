use super::CloudClient;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectMeta {
    pub id: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub meta: ProjectMeta,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct ProjectListResponse {
    #[serde(default)]
    projects: Vec<Project>,
}

impl CloudClient {
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let resp: ProjectListResponse = self.get("/v1/project").await?;
        Ok(resp.projects)
    }
}
