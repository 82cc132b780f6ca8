use super::CloudClient;
use crate::error::ApiError;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Kubernetes {
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Worker {
    #[serde(default)]
    pub name: String,
    pub machine_type: String,
    pub machine_image: String,
    pub minsize: u32,
    pub maxsize: u32,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ClusterCreateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: String,
    pub partition_id: String,
    pub kubernetes: Kubernetes,
    pub workers: Vec<Worker>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_networks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_image: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Partial update; unset fields are left untouched by the server.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ClusterUpdateRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<Kubernetes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minsize: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxsize: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Machine {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ClusterResponse {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub partition_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<Kubernetes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machines: Vec<Machine>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MachineImage {
    pub name: String,
    pub version: String,
}

/// Values accepted by the API when creating or updating clusters.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ClusterConstraints {
    pub partitions: Vec<String>,
    pub networks: Vec<String>,
    pub kubernetes_versions: Vec<String>,
    pub machine_types: Vec<String>,
    pub machine_images: Vec<MachineImage>,
    pub firewall_types: Vec<String>,
    pub firewall_images: Vec<String>,
}

impl CloudClient {
    pub async fn list_clusters(&self) -> Result<Vec<ClusterResponse>, ApiError> {
        self.get("/v1/cluster").await
    }

    pub async fn find_cluster(&self, id: &str) -> Result<ClusterResponse, ApiError> {
        self.get(&format!("/v1/cluster/{id}")).await
    }

    pub async fn create_cluster(
        &self,
        req: &ClusterCreateRequest,
    ) -> Result<ClusterResponse, ApiError> {
        self.send_json(Method::PUT, "/v1/cluster", req).await
    }

    pub async fn update_cluster(
        &self,
        req: &ClusterUpdateRequest,
    ) -> Result<ClusterResponse, ApiError> {
        self.send_json(Method::POST, "/v1/cluster", req).await
    }

    pub async fn delete_cluster(&self, id: &str) -> Result<ClusterResponse, ApiError> {
        self.delete(&format!("/v1/cluster/{id}")).await
    }

    pub async fn list_constraints(&self) -> Result<ClusterConstraints, ApiError> {
        self.get("/v1/cluster/listconstraints").await
    }
}
