//! Deployment watcher: waits for a deployment to leave the queue

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::DeployError;
use crate::http::api::OrchestratorApi;
use crate::models::deployment::DeploymentHandle;
use crate::utils::{calc_exp_backoff, BackoffOptions};

/// Watcher options
#[derive(Debug, Clone)]
pub struct Options {
    /// Poll at all; when false the watcher returns without querying
    pub enabled: bool,

    /// Delay between polls
    pub backoff: BackoffOptions,

    /// Upper bound on the whole watch
    pub timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            enabled: true,
            backoff: BackoffOptions::default(),
            timeout: Duration::from_secs(600),
        }
    }
}

/// How a watch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStatus {
    /// The deployment left the queue after `polls` queries
    Finished { polls: u32 },

    /// Polling was disabled
    Skipped,

    /// The cancellation token fired
    Cancelled,

    /// The timeout elapsed first
    TimedOut,
}

/// Wait until `handle` is no longer an active deployment.
///
/// `sleep_fn` is awaited between polls while the handle is still listed.
/// A failing query ends the watch with that error.
pub async fn watch<A, S, F>(
    api: &A,
    handle: &DeploymentHandle,
    options: &Options,
    sleep_fn: S,
    cancel: &CancellationToken,
) -> Result<WatchStatus, DeployError>
where
    A: OrchestratorApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    if !options.enabled {
        tokio::task::yield_now().await;
        info!("Deployment progress not watched: {}", handle);
        return Ok(WatchStatus::Skipped);
    }

    info!("Deployment in progress: {}", handle);

    let poll = poll_until_finished(api, handle, &options.backoff, sleep_fn);
    let status = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("Deployment watch cancelled: {}", handle);
            WatchStatus::Cancelled
        }
        result = tokio::time::timeout(options.timeout, poll) => match result {
            Ok(polls) => {
                let polls = polls?;
                info!("Deployment finished: {}", handle);
                WatchStatus::Finished { polls }
            }
            Err(_) => {
                warn!("Deployment {} still running after {:?}", handle, options.timeout);
                WatchStatus::TimedOut
            }
        },
    };

    Ok(status)
}

async fn poll_until_finished<A, S, F>(
    api: &A,
    handle: &DeploymentHandle,
    backoff: &BackoffOptions,
    sleep_fn: S,
) -> Result<u32, DeployError>
where
    A: OrchestratorApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let mut polls = 0;

    loop {
        let active = api.list_deployments().await?;
        polls += 1;

        if !active.contains(handle) {
            return Ok(polls);
        }

        let delay = calc_exp_backoff(backoff, polls - 1);
        debug!("Deployment {} still active, next check in {:?}", handle, delay);
        sleep_fn(delay).await;
    }
}
