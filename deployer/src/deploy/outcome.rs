//! Terminal result of one deployment run

use std::fmt;

use crate::models::deployment::DeploymentHandle;

/// What happened to the deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The application was deployed. `verified` is false when progress
    /// watching was disabled.
    Succeeded {
        handle: DeploymentHandle,
        verified: bool,
    },

    /// The application is scaled to zero and was left alone
    SucceededNoOp(String),

    /// The run stopped on an error
    Failed(String),

    /// The watch was cancelled from outside
    Cancelled(DeploymentHandle),

    /// The deployment did not finish within the watch timeout
    TimedOut(DeploymentHandle),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. } | Outcome::SucceededNoOp(_))
    }

    /// Process exit code for the host
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Succeeded { .. } | Outcome::SucceededNoOp(_) => 0,
            Outcome::Failed(_) => 1,
            Outcome::TimedOut(_) => 2,
            Outcome::Cancelled(_) => 130,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Succeeded {
                handle,
                verified: true,
            } => write!(f, "Deployment Succeeded ({} finished).", handle),
            Outcome::Succeeded {
                handle,
                verified: false,
            } => write!(f, "Deployment Succeeded ({} not watched).", handle),
            Outcome::SucceededNoOp(message) => write!(f, "Deployment skipped: {}", message),
            Outcome::Failed(reason) => write!(f, "Deployment Failed: {}", reason),
            Outcome::Cancelled(handle) => {
                write!(f, "Deployment watch cancelled while {} was in progress.", handle)
            }
            Outcome::TimedOut(handle) => {
                write!(f, "Timed out waiting for deployment {} to finish.", handle)
            }
        }
    }
}
