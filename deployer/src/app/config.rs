//! Resolves a deployment run from command-line flags and the environment

use std::path::PathBuf;

use clap::Parser;
use marathon_models::models::AppSpecHeader;
use tracing::{debug, info};

use crate::app::options::AppOptions;
use crate::app::settings::Settings;
use crate::deploy::config::DeploymentConfig;
use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::http::client::Credentials;
use crate::logs::LogLevel;
use crate::utils::is_blank_app_id;

/// Command-line arguments. Every input can also come from the environment.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "marathon-deploy")]
#[command(about = "Create or update a Marathon application and wait for the deployment")]
#[command(version)]
pub struct Args {
    /// Marathon endpoint URL
    #[arg(long, env = "MARATHON_URL")]
    pub url: Option<String>,

    /// Basic-auth user name
    #[arg(long, env = "MARATHON_USERNAME")]
    pub username: Option<String>,

    /// Basic-auth password or access token
    #[arg(long, env = "MARATHON_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Application id; read from the JSON file when omitted
    #[arg(long, env = "MARATHON_APP_ID")]
    pub identifier: Option<String>,

    /// Path to the marathon.json app definition
    #[arg(long = "json-file", env = "MARATHON_JSON_FILE")]
    pub json_file: Option<PathBuf>,

    /// Fail instead of skipping when the app is scaled to 0
    #[arg(long = "fail-on-scaled-to-0", env = "MARATHON_FAIL_ON_SCALED_TO_0")]
    pub fail_on_scaled_to_zero: bool,

    /// Wait until the deployment finishes
    #[arg(long, env = "MARATHON_SHOW_DEPLOYMENT_PROGRESS")]
    pub show_deployment_progress: bool,

    /// Optional JSON settings file
    #[arg(long, env = "MARATHON_DEPLOY_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Emit JSON logs
    #[arg(long)]
    pub json_logs: bool,

    /// Give up watching after this many seconds
    #[arg(long)]
    pub watch_timeout_secs: Option<u64>,

    /// Print build information and exit
    #[arg(long)]
    pub version_info: bool,
}

/// A fully resolved deployment run
#[derive(Debug)]
pub struct DeploymentRequest {
    pub config: DeploymentConfig,

    /// Raw app definition, forwarded verbatim
    pub spec: Vec<u8>,
}

/// Turns raw inputs into validated configuration
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    args: Args,
}

impl ConfigResolver {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Load the settings file if one was given and apply flag overrides
    pub async fn app_options(&self) -> Result<AppOptions, DeployError> {
        let mut settings = match &self.args.settings {
            Some(path) => Settings::load(&File::new(path)).await?,
            None => Settings::default(),
        };

        if let Some(level) = self.args.log_level {
            settings.log_level = level;
        }
        if self.args.json_logs {
            settings.json_logs = true;
        }
        if let Some(timeout) = self.args.watch_timeout_secs {
            settings.watch_timeout_secs = timeout;
        }

        Ok(AppOptions::from_settings(&settings))
    }

    /// Validate inputs, read the app definition once and settle the identifier
    pub async fn resolve(&self) -> Result<DeploymentRequest, DeployError> {
        let url = self
            .args
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| DeployError::Config("Input required: marathonEndpoint".to_string()))?;

        let json_file = self
            .args
            .json_file
            .as_ref()
            .ok_or_else(|| DeployError::Config("Input required: jsonFilePath".to_string()))?;
        let file = File::new(json_file);
        file.check_exists("jsonFilePath").await?;
        info!("marathon.json file path: {}", file.path().display());

        let spec = file.read_bytes().await?;
        debug!("App definition: {}", String::from_utf8_lossy(&spec));

        let identifier = match self.args.identifier.as_deref().map(str::trim) {
            Some(identifier) if !is_blank_app_id(identifier) => identifier.to_string(),
            _ => identifier_from_spec(&spec)?,
        };

        let credentials =
            Credentials::from_parts(self.args.username.clone(), self.args.password.clone());

        let config = DeploymentConfig::new(url, &identifier, json_file)?
            .with_credentials(credentials)
            .with_fail_on_scaled_to_zero(self.args.fail_on_scaled_to_zero)
            .with_poll_enabled(self.args.show_deployment_progress);
        info!("{}", config);

        Ok(DeploymentRequest { config, spec })
    }
}

/// Read the `id` field of an app definition
pub fn identifier_from_spec(spec: &[u8]) -> Result<String, DeployError> {
    let header: AppSpecHeader = serde_json::from_slice(spec)?;
    header
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !is_blank_app_id(id))
        .ok_or_else(|| DeployError::Config("Application id not found.".to_string()))
}
