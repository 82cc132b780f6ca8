//! S3 users and partitions.
//!
//! The S3 endpoints address a user by `(id, partition, tenant, project)` in
//! the request body instead of the path, so even reads are POSTs.

use super::CloudClient;
use crate::error::ApiError;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct S3Key {
    pub access_key: String,
    pub secret_key: String,
}

/// Identity of an S3 user, shared by every per-user request.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct S3UserRef {
    pub id: String,
    pub partition: String,
    pub tenant: String,
    pub project: String,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct S3CreateRequest {
    #[serde(flatten)]
    pub user: S3UserRef,
    pub name: String,
    pub max_buckets: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<S3Key>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct S3DeleteRequest {
    #[serde(flatten)]
    pub user: S3UserRef,
    pub force: bool,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct S3UpdateRequest {
    #[serde(flatten)]
    pub user: S3UserRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_keys: Vec<S3Key>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remove_access_keys: Vec<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct S3ListRequest {
    pub partition: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct S3Response {
    pub id: String,
    #[serde(default)]
    pub partition: String,
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<S3Key>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct S3Partition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CloudClient {
    pub async fn get_s3(&self, user: &S3UserRef) -> Result<S3Response, ApiError> {
        self.send_json(Method::POST, "/v1/s3/get", user).await
    }

    pub async fn create_s3(&self, req: &S3CreateRequest) -> Result<S3Response, ApiError> {
        self.send_json(Method::PUT, "/v1/s3", req).await
    }

    pub async fn delete_s3(&self, req: &S3DeleteRequest) -> Result<S3Response, ApiError> {
        self.send_json(Method::DELETE, "/v1/s3", req).await
    }

    pub async fn update_s3(&self, req: &S3UpdateRequest) -> Result<S3Response, ApiError> {
        self.send_json(Method::POST, "/v1/s3", req).await
    }

    pub async fn list_s3(&self, req: &S3ListRequest) -> Result<Vec<S3Response>, ApiError> {
        self.send_json(Method::POST, "/v1/s3/list", req).await
    }

    pub async fn list_s3_partitions(&self) -> Result<Vec<S3Partition>, ApiError> {
        self.get("/v1/s3/partitions").await
    }
}
