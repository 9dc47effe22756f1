//! Marathon Deploy - Entry Point
//!
//! Pushes a marathon.json app definition to a Marathon endpoint and reports a
//! single succeeded/failed result through the exit status.

use std::process::ExitCode;

use clap::Parser;
use marathon_deploy::app::config::{Args, ConfigResolver};
use marathon_deploy::app::run::run;
use marathon_deploy::logs::init_logging;
use marathon_deploy::utils::version_info;

use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Print version and exit
    if args.version_info {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to render version info: {e}"),
        }
        return ExitCode::SUCCESS;
    }

    let resolver = ConfigResolver::new(args);
    let options = match resolver.app_options().await {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Deployment Failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if let Err(e) = init_logging(&options.logging) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let request = match resolver.resolve().await {
        Ok(request) => request,
        Err(e) => {
            error!("Deployment Failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = run(&options, request, await_shutdown_signal()).await;
    if outcome.is_success() {
        info!("{}", outcome);
    } else {
        error!("{}", outcome);
    }

    ExitCode::from(u8::try_from(outcome.exit_code()).unwrap_or(1))
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => Some(sigterm),
            Err(e) => {
                warn!("Unable to listen for SIGTERM: {}", e);
                None
            }
        };

        tokio::select! {
            Some(_) = async { sigterm.as_mut()?.recv().await } => {
                info!("SIGTERM received, cancelling...");
            }
            Ok(()) = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, cancelling...");
            }
            else => std::future::pending::<()>().await,
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl+C received, cancelling..."),
            // Never cancel when no signal can be observed
            Err(_) => std::future::pending::<()>().await,
        }
    }
}
