//! Axum server setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared state holding the environment
//! lookup and start time), [`build_router`] for constructing the Axum
//! router, [`with_middleware`] for its tracing and timeout layers, and
//! [`shutdown_signal`] for SIGTERM / Ctrl+C handling.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::env::{EnvLookup, ProcessEnv};
use crate::health::health_handler;
use crate::snapshot::config_handler;

pub struct AppState {
    pub env: Arc<dyn EnvLookup>,
    pub start_time: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(env: Arc<dyn EnvLookup>) -> Self {
        Self {
            env,
            start_time: Instant::now(),
        }
    }

    /// State backed by the live process environment.
    #[must_use]
    pub fn from_process_env() -> Self {
        Self::new(Arc::new(ProcessEnv))
    }
}

pub fn build_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    let routes = Router::new()
        .route("/config", get(config_handler))
        .route("/health", get(health_handler))
        .with_state(state);
    with_middleware(routes, request_timeout)
}

/// Request tracing, and a 408 for requests still running after `request_timeout`.
pub fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            )),
    )
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
