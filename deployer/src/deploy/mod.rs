//! Deployment module

pub mod config;
pub mod fsm;
pub mod orchestrator;
pub mod outcome;

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::error;

pub use config::DeploymentConfig;
pub use orchestrator::{DeploymentOrchestrator, Rollout};
pub use outcome::Outcome;

use crate::errors::DeployError;
use crate::http::api::OrchestratorApi;
use crate::utils::is_blank_app_id;
use crate::workers::watcher::{self, WatchStatus};

/// Run one deployment end to end and reduce it to a single `Outcome`.
///
/// The watcher runs only when `config.poll_enabled()` is set; its options
/// supply interval and timeout.
pub async fn execute<A, S, F>(
    api: &A,
    config: &DeploymentConfig,
    spec: &[u8],
    watcher_options: &watcher::Options,
    sleep_fn: S,
    cancel: &CancellationToken,
) -> Outcome
where
    A: OrchestratorApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    match run_pipeline(api, config, spec, watcher_options, sleep_fn, cancel).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Deployment failed: {}", e);
            Outcome::Failed(e.to_string())
        }
    }
}

async fn run_pipeline<A, S, F>(
    api: &A,
    config: &DeploymentConfig,
    spec: &[u8],
    watcher_options: &watcher::Options,
    sleep_fn: S,
    cancel: &CancellationToken,
) -> Result<Outcome, DeployError>
where
    A: OrchestratorApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    if is_blank_app_id(config.identifier()) {
        return Err(DeployError::Config("Application id not found.".to_string()));
    }

    let rollout = DeploymentOrchestrator::new(api, config).deploy(spec).await?;
    let handle = match rollout {
        Rollout::Deployed(handle) => handle,
        Rollout::SkippedScaledZero(message) => return Ok(Outcome::SucceededNoOp(message)),
    };

    let options = watcher::Options {
        enabled: config.poll_enabled(),
        ..watcher_options.clone()
    };
    let status = watcher::watch(api, &handle, &options, sleep_fn, cancel).await?;

    Ok(match status {
        WatchStatus::Finished { .. } => Outcome::Succeeded {
            handle,
            verified: true,
        },
        WatchStatus::Skipped => Outcome::Succeeded {
            handle,
            verified: false,
        },
        WatchStatus::Cancelled => Outcome::Cancelled(handle),
        WatchStatus::TimedOut => Outcome::TimedOut(handle),
    })
}
