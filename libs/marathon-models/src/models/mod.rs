//! API models

use serde::{Deserialize, Serialize};

/// Envelope returned by `GET /v2/apps/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppResponse {
    pub app: AppInfo,
}

/// The fields of an application definition the deployer inspects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInfo {
    pub id: String,
    #[serde(default)]
    pub instances: u32,
}

/// Response of `PUT /v2/apps/{id}` and `POST /v2/apps/{id}/restart`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    /// Absent when the update did not queue anything
    #[serde(default)]
    pub deployment_id: Option<String>,
}

/// One entry of `GET /v2/deployments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub id: String,
    #[serde(default)]
    pub affected_apps: Vec<String>,
}

/// Minimal view of a user-supplied app definition file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSpecHeader {
    #[serde(default)]
    pub id: Option<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}
