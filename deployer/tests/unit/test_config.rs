//! Config resolver tests

use std::path::PathBuf;
use std::time::Duration;

use marathon_deploy::app::config::{Args, ConfigResolver};
use marathon_deploy::errors::DeployError;
use marathon_deploy::logs::LogLevel;
use secrecy::ExposeSecret;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn args(json_file: PathBuf) -> Args {
    Args {
        url: Some("http://marathon.mesos:8080/".to_string()),
        json_file: Some(json_file),
        ..Args::default()
    }
}

#[tokio::test]
async fn test_identifier_read_from_spec() {
    let dir = tempfile::tempdir().unwrap();
    let spec = r#"{"id":"/prod/web","instances":2}"#;
    let json_file = write_file(&dir, "marathon.json", spec);

    let request = ConfigResolver::new(args(json_file.clone()))
        .resolve()
        .await
        .unwrap();

    assert_eq!(request.config.identifier(), "/prod/web");
    assert_eq!(request.config.base_url(), "http://marathon.mesos:8080");
    assert_eq!(request.config.app_spec_path(), json_file.as_path());
    assert_eq!(request.spec, spec.as_bytes());
    assert!(request.config.credentials().is_none());
    assert!(!request.config.poll_enabled());
}

#[tokio::test]
async fn test_identifier_override_wins() {
    let dir = tempfile::tempdir().unwrap();
    let json_file = write_file(&dir, "marathon.json", r#"{"id":"/from-file"}"#);

    let request = ConfigResolver::new(Args {
        identifier: Some("/override".to_string()),
        show_deployment_progress: true,
        fail_on_scaled_to_zero: true,
        ..args(json_file)
    })
    .resolve()
    .await
    .unwrap();

    assert_eq!(request.config.identifier(), "/override");
    assert!(request.config.poll_enabled());
    assert!(request.config.fail_on_scaled_to_zero());
}

#[tokio::test]
async fn test_missing_identifier_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let json_file = write_file(&dir, "marathon.json", r#"{"instances":1}"#);

    let err = ConfigResolver::new(Args {
        identifier: Some("   ".to_string()),
        ..args(json_file)
    })
    .resolve()
    .await
    .unwrap_err();

    assert!(matches!(err, DeployError::Config(ref msg) if msg == "Application id not found."));
}

#[tokio::test]
async fn test_separator_only_identifier_falls_back_to_spec() {
    let dir = tempfile::tempdir().unwrap();
    let json_file = write_file(&dir, "marathon.json", r#"{"id":"/web"}"#);

    let request = ConfigResolver::new(Args {
        identifier: Some("/".to_string()),
        ..args(json_file)
    })
    .resolve()
    .await
    .unwrap();

    assert_eq!(request.config.identifier(), "/web");
}

#[tokio::test]
async fn test_separator_only_identifier_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let json_file = write_file(&dir, "marathon.json", r#"{"id":"//"}"#);

    let err = ConfigResolver::new(Args {
        identifier: Some("/".to_string()),
        ..args(json_file)
    })
    .resolve()
    .await
    .unwrap_err();

    assert!(matches!(err, DeployError::Config(ref msg) if msg == "Application id not found."));
}

#[tokio::test]
async fn test_missing_spec_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = ConfigResolver::new(args(dir.path().join("nope.json")))
        .resolve()
        .await
        .unwrap_err();

    assert!(matches!(err, DeployError::Config(_)));
    assert!(err.to_string().contains("jsonFilePath"));
}

#[tokio::test]
async fn test_missing_url() {
    let dir = tempfile::tempdir().unwrap();
    let json_file = write_file(&dir, "marathon.json", r#"{"id":"/web"}"#);

    let err = ConfigResolver::new(Args {
        url: None,
        ..args(json_file)
    })
    .resolve()
    .await
    .unwrap_err();

    assert!(matches!(err, DeployError::Config(_)));
}

#[tokio::test]
async fn test_password_only_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let json_file = write_file(&dir, "marathon.json", r#"{"id":"/web"}"#);

    let request = ConfigResolver::new(Args {
        password: Some("pat".to_string()),
        ..args(json_file)
    })
    .resolve()
    .await
    .unwrap();

    let credentials = request.config.credentials().unwrap();
    assert_eq!(credentials.username, "");
    assert_eq!(credentials.password.expose_secret(), "pat");
}

#[tokio::test]
async fn test_app_options_from_settings_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let settings = write_file(
        &dir,
        "settings.json",
        r#"{"log_level":"warn","poll_interval_ms":250,"backoff_multiplier":2.0,"watch_timeout_secs":60}"#,
    );

    let options = ConfigResolver::new(Args {
        settings: Some(settings),
        watch_timeout_secs: Some(30),
        json_logs: true,
        ..Args::default()
    })
    .app_options()
    .await
    .unwrap();

    assert_eq!(options.logging.log_level, LogLevel::Warn);
    assert!(options.logging.json_format);
    assert_eq!(options.watcher.backoff.base_delay, Duration::from_millis(250));
    assert_eq!(options.watcher.backoff.multiplier, 2.0);
    assert_eq!(options.watcher.timeout, Duration::from_secs(30));
}
