//! HTTP client implementation

use std::fmt;
use std::time::Duration;

use marathon_models::models::ErrorResponse;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::errors::DeployError;
use crate::utils::join_url;

/// Basic-auth credentials for the orchestrator endpoint
pub struct Credentials {
    /// May be empty when only a token is supplied as the password
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Build credentials from optional endpoint parameters.
    ///
    /// Basic auth is used as soon as either part is present; a missing
    /// username becomes the empty string.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (None, None) => None,
            (username, password) => Some(Self::new(
                username.unwrap_or_default(),
                password.unwrap_or_default(),
            )),
        }
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self::new(self.username.clone(), self.password.expose_secret())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// HTTP client options
#[derive(Debug, Clone)]
pub struct Options {
    /// Timeout applied to every request
    pub request_timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Stateless HTTP gateway to a Marathon endpoint
pub struct MarathonClient {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl MarathonClient {
    /// Create a new client for `base_url`
    pub fn new(
        base_url: &str,
        credentials: Option<Credentials>,
        options: &Options,
    ) -> Result<Self, DeployError> {
        let base_url = base_url.trim();
        url::Url::parse(base_url)
            .map_err(|e| DeployError::Config(format!("Invalid marathon url {}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(options.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            credentials,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a resource path
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Start a request with authentication applied
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let request = self.client.request(method, &url);
        match &self.credentials {
            Some(credentials) => request.basic_auth(
                &credentials.username,
                Some(credentials.password.expose_secret()),
            ),
            None => request,
        }
    }

    /// Send a request and read the whole body
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<(StatusCode, String), DeployError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Marathon responded {}: {}", status, body);
        Ok((status, body))
    }
}

/// Map a non-2xx status to the matching error
pub(crate) fn check_status(status: StatusCode, body: &str) -> Result<(), DeployError> {
    if status.is_success() {
        return Ok(());
    }

    let message = error_message(status, body);
    error!("Marathon request failed: {} - {}", status, message);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DeployError::Authorization {
            status: status.as_u16(),
            message,
        }),
        _ => Err(DeployError::Deployment {
            status: status.as_u16(),
            message,
        }),
    }
}

/// Human-readable message of an error response
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorResponse {
        message: Some(message),
        ..
    }) = serde_json::from_str::<ErrorResponse>(body)
    {
        return message;
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

/// Parse a success body, treating an unparseable payload as a transport fault
pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, DeployError> {
    serde_json::from_str(body).map_err(|e| DeployError::MalformedResponse(e.to_string()))
}
