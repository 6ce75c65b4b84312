//! config-echo reports a service's deployment configuration over HTTP.
//!
//! `GET /config` reads four well-known environment variables on every
//! request and returns them as a flat JSON object, substituting
//! `"NOT_SET"` for any that are absent.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, show, health).
//! - [`env`] -- The [`EnvLookup`](env::EnvLookup) seam over process environment.
//! - [`error`] -- Unified error type using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum router, shared application state, and graceful shutdown.
//! - [`snapshot`] -- The four configuration keys and the `GET /config` handler.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `sentry-integration` | Sentry error tracking |

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod env;
pub mod error;
pub mod health;
pub mod logging;
pub mod server;
pub mod snapshot;

#[cfg(feature = "sentry-integration")]
pub mod sentry_integration;
