//! `config-echo run` — start the HTTP server.
//!
//! Initializes logging, binds the listener, and serves the router until
//! SIGTERM / Ctrl+C, letting in-flight requests finish.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use crate::cli::RunArgs;
use crate::error::EchoError;
use crate::logging;
use crate::server::{self, AppState};
use crate::snapshot::ConfigSnapshot;

pub async fn execute(args: RunArgs) -> Result<(), EchoError> {
    logging::init(&args.log_level, logging::resolve_format(args.pretty, args.json));

    #[cfg(feature = "sentry-integration")]
    let _sentry_guard = args
        .sentry_dsn
        .as_ref()
        .map(|dsn| crate::sentry_integration::init(dsn, args.sentry_environment.as_deref()));

    let state = Arc::new(AppState::from_process_env());

    // Key names only; values may be credentials.
    let snapshot = ConfigSnapshot::capture(state.env.as_ref());
    for (key, value) in snapshot.iter() {
        if value.is_none() {
            tracing::warn!(key = %key, "configuration variable not set");
        }
    }

    let router = server::build_router(state, Duration::from_millis(args.timeout));

    let addr = listen_addr(&args.host, args.port)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        keys_set = snapshot.set_count(),
        timeout_ms = args.timeout,
        "config-echo started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("config-echo stopped");
    Ok(())
}

/// Accepts bare IPv4 and IPv6 hosts (`0.0.0.0`, `::`).
fn listen_addr(host: &str, port: u16) -> Result<SocketAddr, EchoError> {
    Ok(SocketAddr::new(host.parse::<IpAddr>()?, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_host() {
        let addr = listen_addr("0.0.0.0", 8000).unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn ipv6_host() {
        let addr = listen_addr("::", 8000).unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.to_string(), "[::]:8000");
    }

    #[test]
    fn hostname_is_rejected() {
        assert!(matches!(
            listen_addr("localhost", 8000),
            Err(EchoError::AddressParse(_))
        ));
    }
}
