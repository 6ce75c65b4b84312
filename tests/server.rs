//! Integration tests for the HTTP server, config and health endpoints, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use config_echo::env::{EnvLookup, StaticEnv};
use config_echo::health::HealthResponse;
use config_echo::server::{self, AppState};

const ALL_UNSET: &str = r#"{"COSMOS_DB_ENDPOINT":"NOT_SET","AIDIAGEXPERT_ENDPOINT":"NOT_SET","AIDIAGEXPERT_KEY":"NOT_SET","AZURE_STORAGE_CONNECTION_STRING_1":"NOT_SET"}"#;

async fn start_test_server(
    env: impl EnvLookup + 'static,
) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let state = Arc::new(AppState::new(Arc::new(env)));
    let router = server::build_router(state, Duration::from_secs(5));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

async fn get_config(addr: SocketAddr) -> reqwest::Response {
    reqwest::get(format!("http://{addr}/config")).await.unwrap()
}

#[tokio::test]
async fn config_with_nothing_set_reports_sentinels() {
    let (addr, shutdown) = start_test_server(StaticEnv::new()).await;

    let resp = get_config(addr).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(resp.text().await.unwrap(), ALL_UNSET);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn config_echoes_single_set_value() {
    let env = StaticEnv::new().with("COSMOS_DB_ENDPOINT", "https://example.cosmos.azure.com");
    let (addr, shutdown) = start_test_server(env).await;

    let body = get_config(addr).await.text().await.unwrap();
    assert_eq!(
        body,
        r#"{"COSMOS_DB_ENDPOINT":"https://example.cosmos.azure.com","AIDIAGEXPERT_ENDPOINT":"NOT_SET","AIDIAGEXPERT_KEY":"NOT_SET","AZURE_STORAGE_CONNECTION_STRING_1":"NOT_SET"}"#
    );

    let _ = shutdown.send(());
}

#[tokio::test]
async fn config_echoes_all_values_in_order() {
    let env: StaticEnv = [
        ("AZURE_STORAGE_CONNECTION_STRING_1", "DefaultEndpointsProtocol=https;AccountName=x"),
        ("AIDIAGEXPERT_KEY", "secret-key"),
        ("AIDIAGEXPERT_ENDPOINT", "https://diag.example.com"),
        ("COSMOS_DB_ENDPOINT", "https://cosmos.example.com"),
    ]
    .into_iter()
    .collect();
    let (addr, shutdown) = start_test_server(env).await;

    let body = get_config(addr).await.text().await.unwrap();
    assert_eq!(
        body,
        r#"{"COSMOS_DB_ENDPOINT":"https://cosmos.example.com","AIDIAGEXPERT_ENDPOINT":"https://diag.example.com","AIDIAGEXPERT_KEY":"secret-key","AZURE_STORAGE_CONNECTION_STRING_1":"DefaultEndpointsProtocol=https;AccountName=x"}"#
    );

    let _ = shutdown.send(());
}

#[tokio::test]
async fn empty_string_is_reported_as_empty() {
    let env = StaticEnv::new().with("AIDIAGEXPERT_ENDPOINT", "");
    let (addr, shutdown) = start_test_server(env).await;

    let json: serde_json::Value = get_config(addr).await.json().await.unwrap();
    assert_eq!(json["AIDIAGEXPERT_ENDPOINT"], "");
    assert_eq!(json["COSMOS_DB_ENDPOINT"], "NOT_SET");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unrelated_variables_never_leak() {
    let env = |key: &str| Some(format!("value-of-{key}"));
    let (addr, shutdown) = start_test_server(env).await;

    let json: serde_json::Value = get_config(addr).await.json().await.unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert_eq!(object["AIDIAGEXPERT_KEY"], "value-of-AIDIAGEXPERT_KEY");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn repeated_requests_are_byte_identical() {
    let env = StaticEnv::new()
        .with("COSMOS_DB_ENDPOINT", "https://c")
        .with("AIDIAGEXPERT_KEY", "k");
    let (addr, shutdown) = start_test_server(env).await;

    let first = get_config(addr).await.bytes().await.unwrap();
    let second = get_config(addr).await.bytes().await.unwrap();
    assert_eq!(first, second);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn config_rejects_other_methods() {
    let (addr, shutdown) = start_test_server(StaticEnv::new()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/config"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let (addr, shutdown) = start_test_server(StaticEnv::new()).await;

    let resp = reqwest::get(format!("http://{addr}/nonexistent")).await.unwrap();
    assert_eq!(resp.status(), 404);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn health_counts_set_keys() {
    let env = StaticEnv::new()
        .with("COSMOS_DB_ENDPOINT", "x")
        .with("AIDIAGEXPERT_KEY", "");
    let (addr, shutdown) = start_test_server(env).await;

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let health: HealthResponse = resp.json().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.config_keys, 4);
    assert_eq!(health.config_keys_set, 2);
    assert!(!health.git.is_empty());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn slow_requests_time_out_with_408() {
    let slow = axum::Router::new().route(
        "/slow",
        axum::routing::get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    );
    let router = server::with_middleware(slow, Duration::from_millis(50));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let resp = reqwest::get(format!("http://{addr}/slow")).await.unwrap();
    assert_eq!(resp.status(), 408);
}

#[tokio::test]
async fn graceful_shutdown_works() {
    let (addr, shutdown) = start_test_server(StaticEnv::new()).await;

    let url = format!("http://{addr}/config");
    assert!(reqwest::get(&url).await.is_ok());

    let _ = shutdown.send(());

    tokio::time::sleep(Duration::from_millis(100)).await;

    let result = reqwest::get(&url).await;
    assert!(result.is_err());
}
