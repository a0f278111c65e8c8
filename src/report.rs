//! Serializable reports used by the command line front end.
//!
//! # Responsibilities
//! - Build a route tree from config and instrument every resolver
//! - Activate locations and collect per-resolver outcomes
//! - Describe the configured tree and single pattern probes

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::event::push::decode_path;
use crate::event::{EventError, EventSource};
use crate::manager::RouteManager;
use crate::mux::Multiplexer;
use crate::pattern::{Pattern, PatternError};
use crate::resolver::{Outcome, Recorder, Resolution};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Event(#[from] EventError),
}

/// Outcome of one resolver during one activation.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionReport {
    pub route: String,
    pub outcome: Outcome,
    pub matched: String,
    pub remainder: String,
    pub params: HashMap<String, String>,
}

impl From<Resolution> for ResolutionReport {
    fn from(r: Resolution) -> Self {
        Self {
            route: r.route,
            outcome: r.outcome,
            matched: r.event.matched().to_string(),
            remainder: r.event.remainder().to_string(),
            params: r.event.params().clone(),
        }
    }
}

/// First-match mux result for a location.
#[derive(Debug, Clone, Serialize)]
pub struct MuxReport {
    pub mux: String,
    pub path: String,
}

/// Everything that happened for one location.
#[derive(Debug, Clone, Serialize)]
pub struct LocationReport {
    pub location: String,
    pub source: EventSource,
    pub active: Vec<String>,
    pub resolutions: Vec<ResolutionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mux: Option<MuxReport>,
}

/// One row of the configured tree.
#[derive(Debug, Clone, Serialize)]
pub struct TreeEntry {
    pub route: String,
    pub pattern: String,
    pub depth: usize,
}

/// Summary printed by `check`.
#[derive(Debug, Clone, Serialize)]
pub struct TreeReport {
    pub views: usize,
    pub patterns: usize,
    pub muxes: usize,
    pub use_hash: bool,
    pub routes: Vec<TreeEntry>,
}

/// Result of probing a single pattern.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub pattern: String,
    pub path: String,
    pub matched: bool,
    pub prefix: Option<String>,
    pub remainder: Option<String>,
    pub params: HashMap<String, String>,
}

/// Activate each location in turn against the tree described by `config`.
///
/// `force_hash` routes on the fragment even when the config does not.
pub fn resolve_locations(
    config: &RouterConfig,
    force_hash: bool,
    locations: &[String],
) -> Result<Vec<LocationReport>, ReportError> {
    let mut config = config.clone();
    config.navigation.use_hash |= force_hash;

    let mut manager = RouteManager::from_config(&config)?;
    let muxes = Multiplexer::from_config(manager.cache(), &config.muxes)?;

    let log = Recorder::default();
    manager.walk_mut(&mut |resolver| {
        let label = resolver.label().to_string();
        resolver.subscribe(Arc::new(log.labelled(label)));
    });

    let mut reports = Vec::with_capacity(locations.len());
    for location in locations {
        log.clear();
        let active = manager.navigate(location)?;

        let (source, mux) = match manager.location() {
            Some(event) => (event.source(), route_mux(&muxes, event.remainder())),
            None => (EventSource::Path, None),
        };

        reports.push(LocationReport {
            location: location.clone(),
            source,
            active,
            resolutions: log.entries().into_iter().map(ResolutionReport::from).collect(),
            mux,
        });
    }

    Ok(reports)
}

fn route_mux(muxes: &Multiplexer, path: &str) -> Option<MuxReport> {
    if muxes.is_empty() {
        return None;
    }
    match muxes.route(path) {
        Ok((name, rewritten)) => Some(MuxReport {
            mux: name.to_string(),
            path: rewritten,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "No mux matched");
            None
        }
    }
}

/// Describe the tree `config` builds.
pub fn describe_tree(config: &RouterConfig) -> Result<TreeReport, ReportError> {
    let manager = RouteManager::from_config(config)?;

    let mut routes = Vec::new();
    manager.walk(&mut |resolver, depth| {
        routes.push(TreeEntry {
            route: resolver.label().to_string(),
            pattern: resolver.pattern().source().to_string(),
            depth,
        })
    });

    Ok(TreeReport {
        views: manager.views().len(),
        patterns: manager.cache().len(),
        muxes: config.muxes.len(),
        use_hash: manager.uses_hash(),
        routes,
    })
}

/// Probe `path` against a freshly compiled `pattern`.
pub fn probe(pattern: &str, path: &str) -> Result<ProbeReport, ReportError> {
    let compiled = Pattern::compile(pattern)?;
    let found = compiled.matches(&decode_path(path));

    Ok(ProbeReport {
        pattern: pattern.to_string(),
        path: path.to_string(),
        matched: found.is_some(),
        prefix: found.as_ref().map(|m| m.matched.clone()),
        remainder: found.as_ref().map(|m| m.remainder.clone()),
        params: found.map(|m| m.params).unwrap_or_default(),
    })
}
