//! Create-or-update decision logic

use tracing::{debug, info, warn};

use crate::deploy::config::DeploymentConfig;
use crate::deploy::fsm::{DeploymentEvent, DeploymentFsm, DeploymentState, SCALED_TO_ZERO_MESSAGE};
use crate::errors::DeployError;
use crate::http::api::OrchestratorApi;
use crate::models::deployment::{AppLookup, DeploymentHandle};

/// How the rollout ended before any watching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rollout {
    /// A deployment is queued under this handle
    Deployed(DeploymentHandle),

    /// The application is scaled to zero and was not touched
    SkippedScaledZero(String),
}

/// Sequences the orchestrator calls of one deployment
pub struct DeploymentOrchestrator<'a, A: OrchestratorApi + ?Sized> {
    api: &'a A,
    config: &'a DeploymentConfig,
}

impl<'a, A: OrchestratorApi + ?Sized> DeploymentOrchestrator<'a, A> {
    pub fn new(api: &'a A, config: &'a DeploymentConfig) -> Self {
        Self { api, config }
    }

    /// Run the state machine to a terminal state.
    ///
    /// Every call is awaited before the next decision. On error nothing is
    /// rolled back: a definition that was already accepted stays in place.
    pub async fn deploy(&self, spec: &[u8]) -> Result<Rollout, DeployError> {
        let mut fsm =
            DeploymentFsm::new().with_fail_on_scaled_to_zero(self.config.fail_on_scaled_to_zero());
        let result = self.drive(&mut fsm, spec).await;
        if let (Err(e), false) = (&result, fsm.state().is_terminal()) {
            if let Err(invalid) = fsm.process(DeploymentEvent::Error(e.to_string())) {
                debug!("Failure not recorded by state machine: {}", invalid);
            }
        }
        result
    }

    async fn drive(&self, fsm: &mut DeploymentFsm, spec: &[u8]) -> Result<Rollout, DeployError> {
        let identifier = self.config.identifier();

        loop {
            match fsm.state() {
                DeploymentState::CheckingExisting => {
                    let event = match self.api.get_app(identifier).await? {
                        AppLookup::NotFound => {
                            info!("App {} not found in Marathon, creating it", identifier);
                            DeploymentEvent::AppMissing
                        }
                        AppLookup::Found(snapshot) => {
                            if !snapshot.is_scaled_to_zero() {
                                info!(
                                    "App {} already exists in Marathon, overriding its config and restarting it to force an image pull",
                                    identifier
                                );
                            }
                            DeploymentEvent::AppFound {
                                instances: snapshot.instances,
                            }
                        }
                    };
                    advance(fsm, event)?;
                }

                DeploymentState::SkippedScaledZero => {
                    warn!("{}", SCALED_TO_ZERO_MESSAGE);
                    return Ok(Rollout::SkippedScaledZero(SCALED_TO_ZERO_MESSAGE.to_string()));
                }

                DeploymentState::Deploying => {
                    info!("Sending app definition for {}", identifier);
                    let handle = self.api.put_app(identifier, spec).await?;
                    debug!("Update returned deployment {:?}", handle);
                    advance(fsm, DeploymentEvent::Updated(handle))?;
                }

                DeploymentState::Verifying => {
                    info!("Check if deployment launched for {}", identifier);
                    let active = self.api.list_deployments().await?;
                    let queued = fsm.handle().is_some_and(|handle| active.contains(handle));
                    let event = if queued {
                        DeploymentEvent::DeploymentQueued
                    } else {
                        info!("No deployment queued by the update, forcing a restart");
                        DeploymentEvent::DeploymentMissing
                    };
                    advance(fsm, event)?;
                }

                DeploymentState::Restarting => {
                    info!("Restart application {}", identifier);
                    let handle = self.api.restart_app(identifier).await?;
                    advance(fsm, DeploymentEvent::Restarted(handle))?;
                }

                DeploymentState::Done => {
                    return fsm.handle().cloned().map(Rollout::Deployed).ok_or_else(|| {
                        DeployError::InvalidTransition("finished without a deployment".to_string())
                    });
                }

                // Call failures return early, so only the scaled-to-zero
                // rejection lands here
                DeploymentState::Failed => {
                    let reason = fsm.error().unwrap_or(SCALED_TO_ZERO_MESSAGE).to_string();
                    return Err(DeployError::ScaledToZero(reason));
                }
            }
        }
    }
}

fn advance(fsm: &mut DeploymentFsm, event: DeploymentEvent) -> Result<DeploymentState, DeployError> {
    fsm.process(event).map_err(DeployError::InvalidTransition)
}
