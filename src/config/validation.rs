//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every route and mux pattern
//! - Detect duplicate names among siblings
//! - Validate value ranges and log levels
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{MuxConfig, RouteConfig, RouterConfig};
use crate::mux::namespace_pattern;
use crate::observability::logging;
use crate::pattern::{Pattern, PatternError};

/// A single semantic problem in a config.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route {route}: {error}")]
    InvalidPattern { route: String, error: PatternError },

    #[error("route with pattern {pattern:?} under {parent} has no name")]
    EmptyRouteName { parent: String, pattern: String },

    #[error("route name {name:?} is used more than once under {parent}")]
    DuplicateRouteName { parent: String, name: String },

    #[error("mux {mux}: {error}")]
    InvalidNamespace { mux: String, error: PatternError },

    #[error("mux name {0:?} is used more than once")]
    DuplicateMuxName(String),

    #[error("navigation.history_limit must be greater than 0")]
    ZeroHistoryLimit,

    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),
}

/// Validate `config`, collecting every error found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.navigation.history_limit == 0 {
        errors.push(ValidationError::ZeroHistoryLimit);
    }

    if !logging::is_valid_level(&config.observability.log_level) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    validate_routes("<root>", &config.routes, &mut errors);
    validate_muxes(&config.muxes, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(parent: &str, routes: &[RouteConfig], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();

    for route in routes {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName {
                parent: parent.to_string(),
                pattern: route.pattern.clone(),
            });
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName {
                parent: parent.to_string(),
                name: route.name.clone(),
            });
        }

        let path = if parent == "<root>" {
            route.name.clone()
        } else {
            format!("{}/{}", parent, route.name)
        };

        if let Err(error) = Pattern::compile(&route.pattern) {
            errors.push(ValidationError::InvalidPattern {
                route: path.clone(),
                error,
            });
        }

        validate_routes(&path, &route.children, errors);
    }
}

fn validate_muxes(muxes: &[MuxConfig], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();

    for mux in muxes {
        if !seen.insert(mux.name.as_str()) {
            errors.push(ValidationError::DuplicateMuxName(mux.name.clone()));
        }
        if let Err(error) = Pattern::compile(&namespace_pattern(&mux.namespace)) {
            errors.push(ValidationError::InvalidNamespace {
                mux: mux.name.clone(),
                error,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str, pattern: &str, children: Vec<RouteConfig>) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            pattern: pattern.into(),
            children,
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = RouterConfig::default();
        config.routes.push(route(
            "home",
            "/home/*",
            vec![route("model", "/:id", vec![]), route("about", "/about", vec![])],
        ));
        config.routes.push(route("model", "/*", vec![])); // same name, different parent
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.navigation.history_limit = 0;
        config.observability.log_level = "loud".into();
        config.routes.push(route(
            "home",
            "/home/*",
            vec![route("bad", "/*/x", vec![]), route("bad", "/ok", vec![])],
        ));
        config.routes.push(route("", "/x", vec![]));
        config.muxes.push(MuxConfig {
            name: "m".into(),
            namespace: "/:".into(),
            rewrite: None,
        });
        config.muxes.push(MuxConfig {
            name: "m".into(),
            namespace: "/ok".into(),
            rewrite: None,
        });

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroHistoryLimit));
        assert!(errors.contains(&ValidationError::UnknownLogLevel("loud".into())));
        assert!(errors.contains(&ValidationError::DuplicateRouteName {
            parent: "home".into(),
            name: "bad".into(),
        }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidPattern { route, .. } if route == "home/bad")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::EmptyRouteName { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidNamespace { mux, .. } if mux == "m")));
        assert!(errors.contains(&ValidationError::DuplicateMuxName("m".into())));
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = RouterConfig::default();
        config.observability.metrics_address = "not-an-address".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidMetricsAddress("not-an-address".into())]
        );
    }
}
