//! Error types for the Marathon deployer

use thiserror::Error;

/// Main error type for a deployment run
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request marathon permission error ({status}): {message}")]
    Authorization { status: u16, message: String },

    #[error("Marathon deployment error ({status}): {message}")]
    Deployment { status: u16, message: String },

    #[error("Request marathon error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed marathon response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    ScaledToZero(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl DeployError {
    /// Whether the failure happened below the HTTP status level
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DeployError::Transport(_) | DeployError::MalformedResponse(_)
        )
    }

    /// Whether the orchestrator rejected the credentials
    pub fn is_authorization(&self) -> bool {
        matches!(self, DeployError::Authorization { .. })
    }
}

impl From<anyhow::Error> for DeployError {
    fn from(err: anyhow::Error) -> Self {
        DeployError::Config(err.to_string())
    }
}
