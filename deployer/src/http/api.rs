//! Orchestrator API seam used by the deployment state machine

use std::collections::HashSet;

use async_trait::async_trait;

use crate::errors::DeployError;
use crate::models::deployment::{AppLookup, DeploymentHandle};

/// The four orchestrator calls a deployment needs.
///
/// Implementations are stateless: every call acquires and releases its own
/// connection, so nothing is held across the watcher's sleeps.
#[async_trait]
pub trait OrchestratorApi: Send + Sync {
    /// Look up an application. A 404 is `Ok(AppLookup::NotFound)`.
    async fn get_app(&self, identifier: &str) -> Result<AppLookup, DeployError>;

    /// Replace (or create) the application definition with `force=true`.
    ///
    /// Returns `None` when the orchestrator did not assign a deployment.
    async fn put_app(
        &self,
        identifier: &str,
        spec: &[u8],
    ) -> Result<Option<DeploymentHandle>, DeployError>;

    /// Restart the application with `force=true`.
    async fn restart_app(&self, identifier: &str) -> Result<DeploymentHandle, DeployError>;

    /// Ids of every deployment currently queued or running.
    async fn list_deployments(&self) -> Result<HashSet<DeploymentHandle>, DeployError>;
}
