//! Marathon HTTP client

pub mod api;
pub mod apps;
pub mod client;
pub mod deployments;

use std::collections::HashSet;

use async_trait::async_trait;

pub use api::OrchestratorApi;
pub use client::{Credentials, MarathonClient};

use crate::errors::DeployError;
use crate::models::deployment::{AppLookup, DeploymentHandle};

#[async_trait]
impl OrchestratorApi for MarathonClient {
    async fn get_app(&self, identifier: &str) -> Result<AppLookup, DeployError> {
        MarathonClient::get_app(self, identifier).await
    }

    async fn put_app(
        &self,
        identifier: &str,
        spec: &[u8],
    ) -> Result<Option<DeploymentHandle>, DeployError> {
        MarathonClient::put_app(self, identifier, spec).await
    }

    async fn restart_app(&self, identifier: &str) -> Result<DeploymentHandle, DeployError> {
        MarathonClient::restart_app(self, identifier).await
    }

    async fn list_deployments(&self) -> Result<HashSet<DeploymentHandle>, DeployError> {
        self.active_deployment_ids().await
    }
}
