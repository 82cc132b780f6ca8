use super::CloudClient;
use crate::error::ApiError;
use crate::flags::PipeSpec;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Pipes are registered in the order they appear in `pipes`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GatewayCreateRequest {
    pub project_uid: String,
    pub name: String,
    pub pipes: Vec<PipeSpec>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GatewayResponse {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project_uid: String,
    #[serde(default)]
    pub pipes: Vec<PipeSpec>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CloudClient {
    pub async fn create_gateway(
        &self,
        req: &GatewayCreateRequest,
    ) -> Result<GatewayResponse, ApiError> {
        self.send_json(Method::PUT, "/v1/gateway", req).await
    }

    pub async fn list_gateways(&self) -> Result<Vec<GatewayResponse>, ApiError> {
        self.get("/v1/gateway").await
    }

    pub async fn find_gateway(&self, id: &str) -> Result<GatewayResponse, ApiError> {
        self.get(&format!("/v1/gateway/{id}")).await
    }

    pub async fn delete_gateway(&self, id: &str) -> Result<GatewayResponse, ApiError> {
        self.delete(&format!("/v1/gateway/{id}")).await
    }
}
