//! Application configuration options

use std::time::Duration;

use crate::app::settings::Settings;
use crate::http::client;
use crate::logs::LogOptions;
use crate::utils::BackoffOptions;
use crate::workers::watcher;

/// Runtime options that do not depend on the target application
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Logging options
    pub logging: LogOptions,

    /// HTTP client options
    pub client: client::Options,

    /// Deployment watcher options
    pub watcher: watcher::Options,
}

impl AppOptions {
    /// Derive options from a settings file
    pub fn from_settings(settings: &Settings) -> Self {
        let base_delay = Duration::from_millis(settings.poll_interval_ms.max(1));
        Self {
            logging: LogOptions {
                log_level: settings.log_level,
                json_format: settings.json_logs,
            },
            client: client::Options {
                request_timeout: Duration::from_secs(settings.request_timeout_secs),
            },
            watcher: watcher::Options {
                enabled: true,
                backoff: BackoffOptions {
                    base_delay,
                    max_delay: Duration::from_millis(settings.max_poll_interval_ms).max(base_delay),
                    multiplier: settings.backoff_multiplier,
                },
                timeout: Duration::from_secs(settings.watch_timeout_secs),
            },
        }
    }
}
