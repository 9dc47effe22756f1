//! Deployment queue endpoint

use std::collections::HashSet;

use marathon_models::models::DeploymentInfo;
use reqwest::Method;
use tracing::debug;

use crate::errors::DeployError;
use crate::http::client::{check_status, parse_body, MarathonClient};
use crate::models::deployment::DeploymentHandle;

impl MarathonClient {
    /// `GET /v2/deployments`
    pub async fn list_deployments(&self) -> Result<Vec<DeploymentInfo>, DeployError> {
        let request = self.request(Method::GET, "/v2/deployments");
        let (status, body) = self.send(request).await?;
        check_status(status, &body)?;
        parse_body(&body)
    }

    /// Ids of every active deployment
    pub async fn active_deployment_ids(&self) -> Result<HashSet<DeploymentHandle>, DeployError> {
        let deployments = self.list_deployments().await?;
        Ok(deployments
            .into_iter()
            .filter_map(|deployment| {
                debug!(
                    "Active deployment {} affects {:?}",
                    deployment.id, deployment.affected_apps
                );
                DeploymentHandle::new(deployment.id)
            })
            .collect())
    }
}
