//! Marathon HTTP client tests against a mock server

use std::time::Duration;

use marathon_deploy::deploy::{self, DeploymentConfig, Outcome};
use marathon_deploy::errors::DeployError;
use marathon_deploy::http::client::{Credentials, MarathonClient, Options};
use marathon_deploy::models::deployment::{AppLookup, AppSnapshot};
use marathon_deploy::utils::BackoffOptions;
use marathon_deploy::workers::watcher;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_bytes, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{handle, handles};

const SPEC: &[u8] = br#"{"id":"/web","instances":1}"#;

fn client(server: &MockServer) -> MarathonClient {
    MarathonClient::new(&server.uri(), None, &Options::default()).unwrap()
}

#[tokio::test]
async fn test_get_app_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/apps/web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app": { "id": "/web", "instances": 2, "cpus": 0.1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = client(&server).get_app("/web").await.unwrap();

    assert_eq!(lookup, AppLookup::Found(AppSnapshot { instances: 2 }));
}

#[tokio::test]
async fn test_get_app_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/apps/web"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "App '/web' does not exist" })),
        )
        .mount(&server)
        .await;

    let lookup = client(&server).get_app("/web").await.unwrap();

    assert_eq!(lookup, AppLookup::NotFound);
}

#[tokio::test]
async fn test_get_app_unauthorized_and_forbidden() {
    for status in [401u16, 403] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({ "message": "Not Authorized" })),
            )
            .mount(&server)
            .await;

        let err = client(&server).get_app("/web").await.unwrap_err();

        match err {
            DeployError::Authorization { status: got, message } => {
                assert_eq!(got, status);
                assert_eq!(message, "Not Authorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_get_app_server_error_uses_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("leader unknown"))
        .mount(&server)
        .await;

    let err = client(&server).get_app("/web").await.unwrap_err();

    match err {
        DeployError::Deployment { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "leader unknown");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_app_malformed_body_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = client(&server).get_app("/web").await.unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test]
async fn test_connection_refused_is_transport() {
    let client = MarathonClient::new(
        "http://127.0.0.1:1",
        None,
        &Options {
            request_timeout: Duration::from_secs(2),
        },
    )
    .unwrap();

    let err = client.get_app("/web").await.unwrap_err();

    assert!(matches!(err, DeployError::Transport(_)));
}

#[tokio::test]
async fn test_put_app_forces_and_forwards_body_with_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/apps/group/web"))
        .and(query_param("force", "true"))
        .and(header("authorization", "Basic Y2k6c2VjcmV0"))
        .and(header("content-type", "application/json"))
        .and(body_bytes(SPEC.to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deploymentId": "d-1",
            "version": "2024-01-01T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MarathonClient::new(
        &server.uri(),
        Some(Credentials::new("ci", "secret")),
        &Options::default(),
    )
    .unwrap();

    let handle_returned = client.put_app("/group/web", SPEC).await.unwrap();

    assert_eq!(handle_returned, Some(handle("d-1")));
}

#[tokio::test]
async fn test_token_only_credentials_use_empty_username() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Basic OnRva2Vu"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Credentials::from_parts(None, Some("token".to_string()));
    let client = MarathonClient::new(&server.uri(), credentials, &Options::default()).unwrap();

    assert_eq!(client.get_app("/web").await.unwrap(), AppLookup::NotFound);
}

#[tokio::test]
async fn test_put_app_without_deployment_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "v1" })))
        .mount(&server)
        .await;

    assert_eq!(client(&server).put_app("/web", SPEC).await.unwrap(), None);
}

#[tokio::test]
async fn test_put_app_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Object is not valid",
            "details": [{ "path": "/cpus", "errors": ["error.min"] }]
        })))
        .mount(&server)
        .await;

    let err = client(&server).put_app("/web", SPEC).await.unwrap_err();

    assert!(matches!(
        err,
        DeployError::Deployment { status: 422, ref message } if message == "Object is not valid"
    ));
}

#[tokio::test]
async fn test_restart_app() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/apps/web/restart"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deploymentId": "d-restart",
            "version": "v2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        client(&server).restart_app("/web").await.unwrap(),
        handle("d-restart")
    );
}

#[tokio::test]
async fn test_restart_without_deployment_id_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client(&server).restart_app("/web").await.unwrap_err();

    assert!(matches!(err, DeployError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_list_deployments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "d-1", "affectedApps": ["/web"], "currentStep": 1, "totalSteps": 2 },
            { "id": "d-2", "affectedApps": ["/api"] }
        ])))
        .mount(&server)
        .await;

    let ids = client(&server).active_deployment_ids().await.unwrap();

    assert_eq!(ids, handles(&["d-1", "d-2"]));
}

#[tokio::test]
async fn test_trailing_separators_in_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(4)
        .mount(&server)
        .await;

    for suffix in ["", "/", "//", "///"] {
        let base = format!("{}{}", server.uri(), suffix);
        let client = MarathonClient::new(&base, None, &Options::default()).unwrap();
        assert!(client.active_deployment_ids().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_end_to_end_restart_flow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/apps/web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app": { "id": "/web", "instances": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v2/apps/web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deploymentId": "d-put" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/apps/web/restart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deploymentId": "d-restart" })))
        .expect(1)
        .mount(&server)
        .await;

    // verification sees nothing, then the restart is listed once, then done
    Mock::given(method("GET"))
        .and(path("/v2/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "d-restart" }])))
        .up_to_n_times(1)
        .with_priority(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(3)
        .mount(&server)
        .await;

    let client = client(&server);
    let config = DeploymentConfig::new(&format!("{}/", server.uri()), "/web", "marathon.json")
        .unwrap()
        .with_poll_enabled(true);
    let watcher_options = watcher::Options {
        backoff: BackoffOptions {
            base_delay: Duration::from_millis(10),
            ..BackoffOptions::default()
        },
        ..watcher::Options::default()
    };

    let outcome = deploy::execute(
        &client,
        &config,
        SPEC,
        &watcher_options,
        tokio::time::sleep,
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(
        outcome,
        Outcome::Succeeded {
            handle: handle("d-restart"),
            verified: true,
        }
    );
}
