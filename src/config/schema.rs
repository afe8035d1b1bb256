//! Route manifest schema.
//!
//! A manifest is a TOML file with observability settings and the declared
//! route tree. Components are referenced by name and bound to callbacks by a
//! [`ComponentRegistry`](crate::config::registry::ComponentRegistry).

use serde::{Deserialize, Serialize};

use crate::routing::prefab::RouteConfigPrefab;

/// Root of a route manifest.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RouteManifest {
    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Declared route tree.
    pub routes: Vec<RouteConfigPrefab>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
