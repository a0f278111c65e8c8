//! Observer registry types.
//!
//! Resolvers notify observers instead of returning errors: every resolver
//! that is asked to match calls exactly one of `on_match`/`on_fail` on each
//! of its observers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::event::PushEvent;

/// Receives the outcome of each resolution attempt of one resolver.
pub trait RouteObserver: Send + Sync {
    /// Called with the descended event (matched prefix consumed).
    fn on_match(&self, event: &PushEvent);

    /// Called with the event the resolver was asked to match.
    fn on_fail(&self, event: &PushEvent);
}

/// Adapts a closure into an observer that only cares about matches.
pub struct OnMatch<F>(F);

impl<F> OnMatch<F>
where
    F: Fn(&PushEvent) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> RouteObserver for OnMatch<F>
where
    F: Fn(&PushEvent) + Send + Sync,
{
    fn on_match(&self, event: &PushEvent) {
        (self.0)(event)
    }

    fn on_fail(&self, _event: &PushEvent) {}
}

/// Adapts a closure into an observer that only cares about failures.
pub struct OnFail<F>(F);

impl<F> OnFail<F>
where
    F: Fn(&PushEvent) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> RouteObserver for OnFail<F>
where
    F: Fn(&PushEvent) + Send + Sync,
{
    fn on_match(&self, _event: &PushEvent) {}

    fn on_fail(&self, event: &PushEvent) {
        (self.0)(event)
    }
}

/// Result of one resolver being asked to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Matched,
    Failed,
}

/// One recorded notification.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Label of the observer that recorded it (usually the route name).
    pub route: String,
    pub outcome: Outcome,
    pub event: PushEvent,
}

/// An observer that appends every notification to a shared log.
///
/// Recorders created with [`Recorder::labelled`] write to the same log, so a
/// whole tree can be instrumented with one log and distinct labels.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    label: String,
    log: Arc<Mutex<Vec<Resolution>>>,
}

impl Recorder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            log: Arc::default(),
        }
    }

    /// A recorder with a different label sharing this recorder's log.
    pub fn labelled(&self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            log: Arc::clone(&self.log),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Snapshot of the log in notification order.
    pub fn entries(&self) -> Vec<Resolution> {
        self.lock().clone()
    }

    /// Entries recorded under this recorder's own label.
    pub fn own_entries(&self) -> Vec<Resolution> {
        self.lock()
            .iter()
            .filter(|r| r.route == self.label)
            .cloned()
            .collect()
    }

    /// Number of entries with `outcome`, across all labels.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.lock().iter().filter(|r| r.outcome == outcome).count()
    }

    /// Labels that matched, in notification order.
    pub fn matched_routes(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.outcome == Outcome::Matched)
            .map(|r| r.route.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, outcome: Outcome, event: &PushEvent) {
        self.lock().push(Resolution {
            route: self.label.clone(),
            outcome,
            event: event.clone(),
        });
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Resolution>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RouteObserver for Recorder {
    fn on_match(&self, event: &PushEvent) {
        self.record(Outcome::Matched, event);
    }

    fn on_fail(&self, event: &PushEvent) {
        self.record(Outcome::Failed, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_closure_adapters_ignore_other_outcome() {
        let hits = Arc::new(AtomicUsize::new(0));
        let event = PushEvent::from_path("/a").unwrap();

        let h = Arc::clone(&hits);
        let done = OnMatch::new(move |_: &PushEvent| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        done.on_fail(&event);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        done.on_match(&event);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let h = Arc::clone(&hits);
        let failed = OnFail::new(move |_: &PushEvent| {
            h.fetch_add(10, Ordering::SeqCst);
        });
        failed.on_match(&event);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        failed.on_fail(&event);
        assert_eq!(hits.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn test_recorder_shares_log_between_labels() {
        let root = Recorder::new("home");
        let child = root.labelled("detail");
        let event = PushEvent::from_path("/home/1").unwrap();

        root.on_match(&event);
        child.on_fail(&event);

        assert_eq!(root.entries().len(), 2);
        assert_eq!(child.own_entries().len(), 1);
        assert_eq!(child.own_entries()[0].outcome, Outcome::Failed);
        assert_eq!(root.count(Outcome::Matched), 1);
        assert_eq!(root.matched_routes(), vec!["home".to_string()]);

        root.clear();
        assert!(child.entries().is_empty());
    }
}
