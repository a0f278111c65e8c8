//! Shared helpers for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use view_router::{Outcome, Recorder, RouteManager};

/// Subscribe one shared recorder to every resolver of `manager`, labelled by
/// route name.
pub fn instrument(manager: &mut RouteManager) -> Recorder {
    let log = Recorder::default();
    manager.walk_mut(&mut |resolver| {
        let label = resolver.label().to_string();
        resolver.subscribe(Arc::new(log.labelled(label)));
    });
    log
}

/// `(route, outcome)` pairs in notification order.
pub fn outcomes(log: &Recorder) -> Vec<(String, Outcome)> {
    log.entries()
        .into_iter()
        .map(|r| (r.route, r.outcome))
        .collect()
}

/// Write `content` to a unique file in the temp directory.
#[allow(dead_code)]
pub fn write_routes_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "view-router-{}-{}.toml",
        name,
        std::process::id()
    ));
    std::fs::write(&path, content).unwrap();
    path
}
