//! The resolver tree node.

use std::fmt;
use std::sync::Arc;

use crate::event::push::decode_path;
use crate::event::PushEvent;
use crate::observability::metrics;
use crate::pattern::{PathMatch, Pattern, PatternCache, PatternError};
use crate::resolver::observer::{OnFail, OnMatch, RouteObserver};

/// Matches a location against one compiled pattern and fans the unmatched
/// remainder out to its children.
pub struct Resolver {
    label: String,
    pattern: Arc<Pattern>,
    children: Vec<Resolver>,
    observers: Vec<Arc<dyn RouteObserver>>,
}

impl Resolver {
    /// Create a resolver for `pattern`.
    ///
    /// # Panics
    /// If the pattern syntax is invalid. Use [`Resolver::try_new`] for
    /// patterns that are not known at compile time.
    pub fn new(pattern: &str) -> Self {
        match Self::try_new(pattern) {
            Ok(resolver) => resolver,
            Err(e) => panic!("invalid route pattern: {e}"),
        }
    }

    pub fn try_new(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self::from_pattern(Arc::new(Pattern::compile(pattern)?)))
    }

    /// Create a resolver whose pattern is compiled through `cache`.
    pub fn with_cache(cache: &PatternCache, pattern: &str) -> Result<Self, PatternError> {
        Ok(Self::from_pattern(cache.get_or_compile(pattern)?))
    }

    pub fn from_pattern(pattern: Arc<Pattern>) -> Self {
        Self {
            label: pattern.source().to_string(),
            pattern,
            children: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Replace the label used in logs and lookups (defaults to the pattern).
    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn children(&self) -> &[Resolver] {
        &self.children
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Probe `path` against this resolver's own pattern without notifying
    /// anyone. `path` is anchored and percent-decoded the same way a
    /// [`PushEvent`] built from it would be.
    pub fn test(&self, path: &str) -> Option<PathMatch> {
        self.pattern.matches(&decode_path(path))
    }

    /// Match the event's remainder and notify.
    ///
    /// On a match every observer receives the descended event, then every
    /// child resolves it in registration order. On a failure every observer
    /// receives `event` unchanged and children are not asked. Returns whether
    /// this resolver matched.
    pub fn resolve(&self, event: &PushEvent) -> bool {
        let Some(level) = self.pattern.matches(event.remainder()) else {
            tracing::debug!(
                route = %self.label,
                pattern = %self.pattern,
                remainder = %event.remainder(),
                "Route did not match"
            );
            metrics::record_resolution(false);
            for observer in &self.observers {
                observer.on_fail(event);
            }
            return false;
        };

        let next = event.descend(&level);
        tracing::debug!(
            route = %self.label,
            matched = %next.matched(),
            remainder = %next.remainder(),
            children = self.children.len(),
            "Route matched"
        );
        metrics::record_resolution(true);

        for observer in &self.observers {
            observer.on_match(&next);
        }
        for child in &self.children {
            child.resolve(&next);
        }
        true
    }

    /// Attach `child`. The parent owns it from now on; the returned handle
    /// can be used to subscribe to it or register grandchildren.
    pub fn register(&mut self, child: Resolver) -> &mut Resolver {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// Subscribe a closure to successful matches.
    pub fn done<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&PushEvent) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(OnMatch::new(f)))
    }

    /// Subscribe a closure to failed matches.
    pub fn failed<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&PushEvent) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(OnFail::new(f)))
    }

    pub fn subscribe(&mut self, observer: Arc<dyn RouteObserver>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    /// Depth-first search of this subtree by label.
    pub fn find_mut(&mut self, label: &str) -> Option<&mut Resolver> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(label))
    }

    /// Visit this resolver and its descendants in pre-order.
    pub fn walk_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Resolver),
    {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }

    /// Visit this resolver and its descendants in pre-order with their depth
    /// (0 for `self`).
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&Resolver, usize),
    {
        self.walk_at(0, f);
    }

    fn walk_at<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&Resolver, usize),
    {
        f(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, f);
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("label", &self.label)
            .field("pattern", &self.pattern.source())
            .field("observers", &self.observers.len())
            .field("children", &self.children)
            .finish()
    }
}
