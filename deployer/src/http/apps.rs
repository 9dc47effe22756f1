//! Application endpoints

use marathon_models::models::{AppResponse, DeploymentResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::errors::DeployError;
use crate::http::client::{check_status, parse_body, MarathonClient};
use crate::models::deployment::{AppLookup, AppSnapshot, DeploymentHandle};
use crate::utils::encode_app_id;

const FORCE: [(&str, &str); 1] = [("force", "true")];

fn app_path(identifier: &str) -> String {
    format!("/v2/apps/{}", encode_app_id(identifier))
}

impl MarathonClient {
    /// `GET /v2/apps/{id}`
    pub async fn get_app(&self, identifier: &str) -> Result<AppLookup, DeployError> {
        let request = self.request(Method::GET, &app_path(identifier));
        let (status, body) = self.send(request).await?;

        if status == StatusCode::NOT_FOUND {
            debug!("App {} does not exist yet", identifier);
            return Ok(AppLookup::NotFound);
        }
        check_status(status, &body)?;

        let response: AppResponse = parse_body(&body)?;
        Ok(AppLookup::Found(AppSnapshot {
            instances: response.app.instances,
        }))
    }

    /// `PUT /v2/apps/{id}?force=true` with the app definition as body
    pub async fn put_app(
        &self,
        identifier: &str,
        spec: &[u8],
    ) -> Result<Option<DeploymentHandle>, DeployError> {
        let request = self
            .request(Method::PUT, &app_path(identifier))
            .query(&FORCE)
            .header(CONTENT_TYPE, "application/json")
            .body(spec.to_vec());
        let (status, body) = self.send(request).await?;
        check_status(status, &body)?;

        let result: DeploymentResult = if body.trim().is_empty() {
            DeploymentResult::default()
        } else {
            parse_body(&body)?
        };
        Ok(result.deployment_id.and_then(DeploymentHandle::new))
    }

    /// `POST /v2/apps/{id}/restart?force=true`
    pub async fn restart_app(&self, identifier: &str) -> Result<DeploymentHandle, DeployError> {
        let path = format!("{}/restart", app_path(identifier));
        let request = self
            .request(Method::POST, &path)
            .query(&FORCE)
            .header(CONTENT_TYPE, "application/json");
        let (status, body) = self.send(request).await?;
        check_status(status, &body)?;

        let result: DeploymentResult = parse_body(&body)?;
        result
            .deployment_id
            .and_then(DeploymentHandle::new)
            .ok_or_else(|| {
                DeployError::MalformedResponse("restart response has no deploymentId".to_string())
            })
    }
}
