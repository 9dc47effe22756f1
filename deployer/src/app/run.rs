//! Wires configuration, client and pipeline together for one run

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::app::config::DeploymentRequest;
use crate::app::options::AppOptions;
use crate::deploy::{self, Outcome};
use crate::http::client::MarathonClient;

/// Run one deployment.
///
/// `shutdown_signal` resolving cancels the deployment watch; the calls that
/// decide and submit the deployment are always allowed to finish.
pub async fn run(
    options: &AppOptions,
    request: DeploymentRequest,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Outcome {
    let DeploymentRequest { config, spec } = request;

    let client = match MarathonClient::new(
        config.base_url(),
        config.credentials().cloned(),
        &options.client,
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create marathon client: {}", e);
            return Outcome::Failed(e.to_string());
        }
    };

    let cancel = CancellationToken::new();
    let signal_task = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            shutdown_signal.await;
            cancel.cancel();
        })
    };

    info!("Deploying {} to {}", config.identifier(), client.base_url());
    let outcome = deploy::execute(
        &client,
        &config,
        &spec,
        &options.watcher,
        tokio::time::sleep,
        &cancel,
    )
    .await;

    signal_task.abort();
    outcome
}
