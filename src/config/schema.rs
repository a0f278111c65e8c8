//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// How locations are turned into events and how much history is kept.
    pub navigation: NavigationConfig,

    /// Top-level views and their nested routes.
    pub routes: Vec<RouteConfig>,

    /// Namespace multiplexers (first match wins).
    pub muxes: Vec<MuxConfig>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus endpoint in watch mode.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Navigation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Route on the URL fragment instead of the path.
    pub use_hash: bool,

    /// Number of past events kept by the route manager.
    pub history_limit: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            use_hash: false,
            history_limit: 32,
        }
    }
}

/// A resolver and its nested children.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging and reports. Unique among siblings.
    pub name: String,

    /// Path pattern (`/home/*`, `/:id`, ...).
    pub pattern: String,

    /// Resolvers that receive the remainder when this one matches.
    #[serde(default)]
    pub children: Vec<RouteConfig>,
}

/// Namespace multiplexer entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MuxConfig {
    /// Mux identifier. Unique among muxes.
    pub name: String,

    /// Namespace prefix; `/*` is appended when missing.
    pub namespace: String,

    /// Prefix prepended to the stripped path.
    #[serde(default)]
    pub rewrite: Option<String>,
}
