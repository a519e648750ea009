#![allow(clippy::unwrap_used)]
// Integration tests for `Monitor` using wiremock.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xmrnodes_core::{AuthCredentials, CoreError, JobFilter, Monitor, MonitorConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(auth: Option<AuthCredentials>) -> (MockServer, Monitor) {
    let server = MockServer::start().await;
    let mut config = MonitorConfig::new(Url::parse(&server.uri()).unwrap());
    config.auth = auth;
    config.rows_per_page = 2;
    let monitor = Monitor::new(config).unwrap();
    (server, monitor)
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "ok",
        "message": "Success",
        "data": data,
    }))
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_overlapping_requests_keep_newest_count() {
    let (server, monitor) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/nodes"))
        .and(query_param("page", "1"))
        .respond_with(
            ok(json!({ "total_rows": 3, "items": [{ "id": 1 }] }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/nodes"))
        .and(query_param("page", "2"))
        .respond_with(ok(json!({ "total_rows": 120, "items": [{ "id": 2 }] })))
        .mount(&server)
        .await;

    let table = monitor.table();
    let (slow, fast) = tokio::join!(monitor.nodes(&table), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        table.set_page(2);
        monitor.nodes(&table).await
    });

    // Both callers get their rows; only the newer request sets the count.
    assert_eq!(slow.unwrap().items[0].id, 1);
    assert_eq!(fast.unwrap().items[0].id, 2);
    assert_eq!(table.total_rows(), 120);
    assert_eq!(table.total_pages(), 60);
}

#[tokio::test]
async fn test_configured_credentials_log_in_before_gated_reads() {
    let (server, monitor) = setup(Some(AuthCredentials::Credentials {
        username: "admin".into(),
        password: SecretString::from("hunter2".to_string()),
    }))
    .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "xmr-nodes-ui=auth_1_1700000000; Path=/")
                .set_body_json(json!({ "status": "ok", "message": "Logged in", "data": null })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/crons"))
        .and(header("cookie", "xmr-nodes-ui=auth_1_1700000000"))
        .respond_with(ok(json!({
            "total_rows": 1,
            "rows_per_page": 10,
            "items": [{ "id": 1, "title": "Delete old probe logs" }],
        })))
        .mount(&server)
        .await;

    let table = monitor.table();
    let first = monitor.crons(&table).await.unwrap().into_data().unwrap();
    let second = monitor.crons(&table).await.unwrap().into_data().unwrap();

    assert_eq!(first.items[0].title, "Delete old probe logs");
    assert_eq!(second.total_rows, 1);
}

#[tokio::test]
async fn test_gated_read_without_credentials_requires_login() {
    let (server, monitor) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/prober"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "message": "Unauthorized",
            "data": null,
        })))
        .mount(&server)
        .await;

    let table = monitor.table();
    assert!(monitor.probers(&table).await.unwrap().is_auth_required());
}

#[tokio::test]
async fn test_login_returns_session_token() {
    let (server, monitor) = setup(Some(AuthCredentials::Credentials {
        username: "admin".into(),
        password: SecretString::from("hunter2".to_string()),
    }))
    .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "xmr-nodes-ui=fresh-token; Path=/")
                .set_body_json(json!({ "status": "ok", "message": "Logged in", "data": null })),
        )
        .mount(&server)
        .await;

    let token = monitor.login().await.unwrap();
    assert_eq!(token.expose_secret(), "fresh-token");
}

#[tokio::test]
async fn test_unknown_node_is_not_found() {
    let (server, monitor) = setup(None).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/nodes/id/404"))
        .respond_with(ok(json!({ "id": 0 })))
        .mount(&server)
        .await;

    let err = monitor.node(404).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { ref identifier, .. } if identifier == "404"));
}

#[tokio::test]
async fn test_job_without_prober_key_is_config_error() {
    let (_server, monitor) = setup(None).await;

    let err = monitor.request_job(JobFilter::default()).await.unwrap_err();
    assert!(matches!(err, CoreError::Config { .. }));
}

#[tokio::test]
async fn test_login_without_credentials_is_config_error() {
    let (_server, monitor) = setup(None).await;

    let err = monitor.login().await.unwrap_err();
    assert!(matches!(err, CoreError::Config { .. }));
}
