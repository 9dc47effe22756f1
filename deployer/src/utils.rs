//! Utility functions

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Version information for the deployer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("DEPLOYER_GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("DEPLOYER_BUILD_TIME").unwrap_or("unknown").to_string(),
    }
}

/// Backoff options for a polling loop
#[derive(Debug, Clone)]
pub struct BackoffOptions {
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl Default for BackoffOptions {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            multiplier: 1.0,
        }
    }
}

/// Calculate the delay before poll number `attempt` (0-based)
pub fn calc_exp_backoff(options: &BackoffOptions, attempt: u32) -> Duration {
    let multiplier = options.multiplier.max(1.0);
    let exponent = attempt.min(i32::MAX as u32) as i32;
    let delay_secs = options.base_delay.as_secs_f64() * multiplier.powi(exponent);
    let max_secs = options.max_delay.max(options.base_delay).as_secs_f64();
    let capped_delay = delay_secs.min(max_secs);
    Duration::from_secs_f64(capped_delay)
}

/// Join a base URL and a resource path.
///
/// The two parts are concatenated, then every run of `/` is collapsed to a
/// single `/` unless the run directly follows a `:` (so `http://` survives).
pub fn join_url(base: &str, path: &str) -> String {
    let joined = format!("{}/{}", base, path);
    let mut out = String::with_capacity(joined.len());
    let mut prev: Option<char> = None;
    let mut in_scheme_run = false;

    for c in joined.chars() {
        if c == '/' {
            match prev {
                Some(':') => in_scheme_run = true,
                Some('/') if !in_scheme_run => continue,
                _ => {}
            }
        } else {
            in_scheme_run = false;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Collapse duplicate separators in a base URL and drop trailing ones
pub fn normalize_base_url(base: &str) -> String {
    join_url(base.trim(), "").trim_end_matches('/').to_string()
}

/// Percent-encode an application id for use in a URL path.
///
/// Marathon ids are hierarchical (`/group/app`), so each segment is encoded
/// on its own and the `/` separators are kept. Leading and trailing
/// separators are dropped.
pub fn encode_app_id(identifier: &str) -> String {
    identifier
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// True when an id has no non-empty segment, e.g. `""`, `"/"` or `"//"`
pub fn is_blank_app_id(identifier: &str) -> bool {
    identifier.split('/').all(|segment| segment.trim().is_empty())
}
