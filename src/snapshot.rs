//! `GET /config` endpoint handler.
//!
//! Builds a [`ConfigSnapshot`] of the four deployment settings from the
//! injected [`EnvLookup`](crate::env::EnvLookup) on every request and
//! returns it as a flat JSON object. Unset values are carried as `None`
//! and only become the [`NOT_SET`] sentinel when serialized.

use std::fmt;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::env::EnvLookup;
use crate::server::AppState;

/// Placeholder emitted for variables absent from the environment.
pub const NOT_SET: &str = "NOT_SET";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    CosmosDbEndpoint,
    AiDiagExpertEndpoint,
    AiDiagExpertKey,
    AzureStorageConnectionString1,
}

impl ConfigKey {
    /// All keys, in response order.
    pub const ALL: [Self; 4] = [
        Self::CosmosDbEndpoint,
        Self::AiDiagExpertEndpoint,
        Self::AiDiagExpertKey,
        Self::AzureStorageConnectionString1,
    ];

    /// Environment variable name, also used as the JSON field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CosmosDbEndpoint => "COSMOS_DB_ENDPOINT",
            Self::AiDiagExpertEndpoint => "AIDIAGEXPERT_ENDPOINT",
            Self::AiDiagExpertKey => "AIDIAGEXPERT_KEY",
            Self::AzureStorageConnectionString1 => "AZURE_STORAGE_CONNECTION_STRING_1",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::CosmosDbEndpoint => 0,
            Self::AiDiagExpertEndpoint => 1,
            Self::AiDiagExpertKey => 2,
            Self::AzureStorageConnectionString1 => 3,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    values: [Option<String>; 4],
}

impl ConfigSnapshot {
    /// Read every key from `env`.
    #[must_use]
    pub fn capture(env: &dyn EnvLookup) -> Self {
        Self {
            values: ConfigKey::ALL.map(|key| env.lookup(key.as_str())),
        }
    }

    /// The raw value, `None` when the variable is unset.
    #[must_use]
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        self.values[key.index()].as_deref()
    }

    /// The value as it appears in the response body.
    #[must_use]
    pub fn display_value(&self, key: ConfigKey) -> &str {
        self.get(key).unwrap_or(NOT_SET)
    }

    #[must_use]
    pub fn set_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigKey, Option<&str>)> + '_ {
        ConfigKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

impl Serialize for ConfigSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ConfigKey::ALL.len()))?;
        for key in ConfigKey::ALL {
            map.serialize_entry(key.as_str(), self.display_value(key))?;
        }
        map.end()
    }
}

pub async fn config_handler(State(state): State<Arc<AppState>>) -> Json<ConfigSnapshot> {
    Json(ConfigSnapshot::capture(state.env.as_ref()))
}
