//! Deployment configuration for a single run

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::DeployError;
use crate::http::client::Credentials;
use crate::utils::{is_blank_app_id, normalize_base_url};

/// Everything one deployment run needs to know about its target.
///
/// Built once by the config resolver and never mutated afterwards; the
/// `with_*` methods consume the value.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    base_url: String,
    identifier: String,
    credentials: Option<Credentials>,
    app_spec_path: PathBuf,
    fail_on_scaled_to_zero: bool,
    poll_enabled: bool,
}

impl DeploymentConfig {
    /// Create a config, rejecting an identifier with no path segment
    pub fn new(
        base_url: &str,
        identifier: &str,
        app_spec_path: impl Into<PathBuf>,
    ) -> Result<Self, DeployError> {
        let identifier = identifier.trim();
        if is_blank_app_id(identifier) {
            return Err(DeployError::Config("Application id not found.".to_string()));
        }
        let base_url = normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(DeployError::Config("Marathon url is empty.".to_string()));
        }

        Ok(Self {
            base_url,
            identifier: identifier.to_string(),
            credentials: None,
            app_spec_path: app_spec_path.into(),
            fail_on_scaled_to_zero: false,
            poll_enabled: false,
        })
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_fail_on_scaled_to_zero(mut self, fail: bool) -> Self {
        self.fail_on_scaled_to_zero = fail;
        self
    }

    pub fn with_poll_enabled(mut self, enabled: bool) -> Self {
        self.poll_enabled = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn app_spec_path(&self) -> &Path {
        &self.app_spec_path
    }

    pub fn fail_on_scaled_to_zero(&self) -> bool {
        self.fail_on_scaled_to_zero
    }

    pub fn poll_enabled(&self) -> bool {
        self.poll_enabled
    }
}

impl fmt::Display for DeploymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Url: {}\nIdentifier: {}", self.base_url, self.identifier)
    }
}
