//! Unified error type for config-echo.
//!
//! Serving `/config` cannot fail; [`EchoError`] covers the process-level
//! faults around it (binding the listener, talking to a running instance
//! from the CLI, printing output).

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EchoError {
    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
