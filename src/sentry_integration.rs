//! Optional Sentry error tracking.
//!
//! Hold the returned guard for the lifetime of `run` so panics and
//! error-level events are flushed before exit.

pub fn init(dsn: &str, environment: Option<&str>) -> sentry::ClientInitGuard {
    let dsn = dsn
        .parse::<sentry::types::Dsn>()
        .inspect_err(|e| tracing::warn!(error = %e, "invalid Sentry DSN, error tracking disabled"))
        .ok();

    sentry::init(sentry::ClientOptions {
        dsn,
        environment: environment.map(|e| e.to_owned().into()),
        release: Some(concat!(env!("CARGO_PKG_NAME"), "@", env!("CARGO_PKG_VERSION")).into()),
        // Request bodies and headers stay out of reports; /config responses carry credentials.
        send_default_pii: false,
        ..Default::default()
    })
}
