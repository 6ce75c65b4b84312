//! `config-echo health` — check the health of a running instance.
//!
//! Sends a `GET /health` request to the specified URL and displays
//! the response as formatted text or raw JSON.

use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::EchoError;
use crate::health::HealthResponse;

type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;
type HttpClient = Client<HttpsConnector, http_body_util::Full<bytes::Bytes>>;

pub async fn execute(args: HealthArgs) -> Result<(), EchoError> {
    let uri = health_uri(&args.url)?;
    let client = build_http_client();

    let req = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| EchoError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(std::time::Duration::from_secs(10), client.request(req))
        .await
        .map_err(|_| EchoError::HttpRequest {
            source: "health check timed out after 10s".into(),
        })?
        .map_err(|e| EchoError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| EchoError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if !status.is_success() {
        return Err(EchoError::HealthCheckFailed(status));
    }

    let body_str = String::from_utf8_lossy(&body);
    if args.json {
        println!("{body_str}");
        return Ok(());
    }

    match serde_json::from_str::<HealthResponse>(&body_str) {
        Ok(health) => {
            println!("\u{2713} config-echo is healthy ({})", args.url);
            println!("  version:   {} ({})", health.version, health.git);
            println!("  uptime:    {}", format_uptime(health.uptime_seconds));
            println!(
                "  config:    {}/{} keys set",
                health.config_keys_set, health.config_keys
            );
        }
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{body_str}");
        }
    }

    Ok(())
}

fn health_uri(base: &str) -> Result<hyper::Uri, EchoError> {
    format!("{}/health", base.trim_end_matches('/'))
        .parse()
        .map_err(|e: hyper::http::uri::InvalidUri| EchoError::UriParse {
            source: Box::new(e),
        })
}

/// Client for both `http://` and `https://` instances.
fn build_http_client() -> HttpClient {
    // With more than one rustls crypto provider compiled in, the default
    // cannot be auto-detected; pin `ring`.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new()).build(https)
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
