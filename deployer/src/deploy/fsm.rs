//! Finite State Machine for a create-or-update deployment

use crate::models::deployment::DeploymentHandle;

/// Deployment state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    /// Querying whether the application already exists
    CheckingExisting,

    /// Sending the application definition
    Deploying,

    /// Existing application is scaled to zero and was left untouched
    SkippedScaledZero,

    /// Checking whether the update queued a deployment
    Verifying,

    /// Forcing a restart because the update queued nothing
    Restarting,

    /// A deployment is queued and its handle is known
    Done,

    /// Terminal failure
    Failed,
}

impl DeploymentState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeploymentState::Done | DeploymentState::SkippedScaledZero | DeploymentState::Failed
        )
    }
}

/// Deployment event
#[derive(Debug, Clone)]
pub enum DeploymentEvent {
    /// The application does not exist
    AppMissing,

    /// The application exists with this many instances
    AppFound { instances: u32 },

    /// The definition was accepted
    Updated(Option<DeploymentHandle>),

    /// The current handle is in the deployment queue
    DeploymentQueued,

    /// The current handle is not in the deployment queue
    DeploymentMissing,

    /// A restart was accepted with a fresh handle
    Restarted(DeploymentHandle),

    /// A call failed
    Error(String),
}

/// Reason recorded when an app scaled to zero is left alone or rejected
pub const SCALED_TO_ZERO_MESSAGE: &str =
    "Application was previously scaled to 0. We won't override its config and won't restart it";

/// Deployment FSM.
///
/// An existing app with zero instances ends in `SkippedScaledZero`, or in
/// `Failed` when `fail_on_scaled_to_zero` is set.
#[derive(Debug, Clone)]
pub struct DeploymentFsm {
    state: DeploymentState,
    handle: Option<DeploymentHandle>,
    error: Option<String>,
    fail_on_scaled_to_zero: bool,
}

impl DeploymentFsm {
    /// Create a new FSM about to check the existing application
    pub fn new() -> Self {
        Self {
            state: DeploymentState::CheckingExisting,
            handle: None,
            error: None,
            fail_on_scaled_to_zero: false,
        }
    }

    /// Fail instead of skipping an app scaled to zero
    pub fn with_fail_on_scaled_to_zero(mut self, fail: bool) -> Self {
        self.fail_on_scaled_to_zero = fail;
        self
    }

    /// Get current state
    pub fn state(&self) -> DeploymentState {
        self.state
    }

    /// The deployment handle currently tracked, if any
    pub fn handle(&self) -> Option<&DeploymentHandle> {
        self.handle.as_ref()
    }

    /// Get error message if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: DeploymentEvent) -> Result<DeploymentState, String> {
        let new_state = match (self.state, event) {
            (state, DeploymentEvent::Error(err)) if !state.is_terminal() => {
                self.error = Some(err);
                DeploymentState::Failed
            }

            // From CheckingExisting
            (DeploymentState::CheckingExisting, DeploymentEvent::AppMissing) => {
                DeploymentState::Deploying
            }
            (DeploymentState::CheckingExisting, DeploymentEvent::AppFound { instances: 0 }) => {
                if self.fail_on_scaled_to_zero {
                    self.error = Some(SCALED_TO_ZERO_MESSAGE.to_string());
                    DeploymentState::Failed
                } else {
                    DeploymentState::SkippedScaledZero
                }
            }
            (DeploymentState::CheckingExisting, DeploymentEvent::AppFound { .. }) => {
                DeploymentState::Deploying
            }

            // From Deploying
            (DeploymentState::Deploying, DeploymentEvent::Updated(handle)) => {
                self.handle = handle;
                DeploymentState::Verifying
            }

            // From Verifying
            (DeploymentState::Verifying, DeploymentEvent::DeploymentQueued) => {
                DeploymentState::Done
            }
            (DeploymentState::Verifying, DeploymentEvent::DeploymentMissing) => {
                DeploymentState::Restarting
            }

            // From Restarting
            (DeploymentState::Restarting, DeploymentEvent::Restarted(handle)) => {
                self.handle = Some(handle);
                DeploymentState::Done
            }

            // Invalid transitions
            (state, event) => {
                return Err(format!("{:?} -> {:?}", state, event));
            }
        };

        self.state = new_state;
        Ok(new_state)
    }
}

impl Default for DeploymentFsm {
    fn default() -> Self {
        Self::new()
    }
}
