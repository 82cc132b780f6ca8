use super::CloudClient;
use crate::error::ApiError;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PostgresSize {
    pub cpu: String,
    pub storage_size: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PostgresAccessList {
    #[serde(default)]
    pub source_ranges: Vec<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct PostgresCreateRequest {
    pub description: String,
    pub project_id: String,
    pub partition_id: String,
    pub version: String,
    pub number_of_instances: u32,
    pub size: PostgresSize,
    pub access_list: PostgresAccessList,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub maintenance: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PostgresResponse {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub partition_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PostgresSize>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PostgresVersion {
    pub version: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Partition name to partition details, as returned by the API.
pub type PostgresPartitions = BTreeMap<String, Value>;

impl CloudClient {
    pub async fn list_postgres(&self) -> Result<Vec<PostgresResponse>, ApiError> {
        self.get("/v1/database/postgres").await
    }

    pub async fn find_postgres(&self, id: &str) -> Result<PostgresResponse, ApiError> {
        self.get(&format!("/v1/database/postgres/{id}")).await
    }

    pub async fn create_postgres(
        &self,
        req: &PostgresCreateRequest,
    ) -> Result<PostgresResponse, ApiError> {
        self.send_json(Method::PUT, "/v1/database/postgres", req)
            .await
    }

    pub async fn delete_postgres(&self, id: &str) -> Result<PostgresResponse, ApiError> {
        self.delete(&format!("/v1/database/postgres/{id}")).await
    }

    pub async fn postgres_partitions(&self) -> Result<PostgresPartitions, ApiError> {
        self.get("/v1/database/postgres/partitions").await
    }

    pub async fn postgres_versions(&self) -> Result<Vec<PostgresVersion>, ApiError> {
        self.get("/v1/database/postgres/versions").await
    }
}
