//! Deployment models

use std::fmt;

/// Server-assigned identifier of an in-flight application change
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeploymentHandle(String);

impl DeploymentHandle {
    /// Wrap a raw id. Blank ids are treated as "no handle".
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State of an existing application at query time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSnapshot {
    /// Configured instance count
    pub instances: u32,
}

impl AppSnapshot {
    pub fn is_scaled_to_zero(&self) -> bool {
        self.instances == 0
    }
}

/// Result of looking an application up by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppLookup {
    Found(AppSnapshot),
    NotFound,
}
