//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] JSON payload with the build version,
//! git revision, uptime, and how many of the reported configuration keys
//! are currently present in the environment. Values are never included.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::server::AppState;
use crate::snapshot::{ConfigKey, ConfigSnapshot};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub git: String,
    pub uptime_seconds: u64,
    pub config_keys: usize,
    pub config_keys_set: usize,
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = ConfigSnapshot::capture(state.env.as_ref());

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        git: env!("CONFIG_ECHO_GIT_SHORT").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        config_keys: ConfigKey::ALL.len(),
        config_keys_set: snapshot.set_count(),
    })
}
