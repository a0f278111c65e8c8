//! The route manager: mounted views, activation and history.

use std::collections::VecDeque;

use crate::config::schema::{NavigationConfig, RouteConfig, RouterConfig};
use crate::event::{EventError, PushEvent};
use crate::observability::metrics;
use crate::pattern::{PatternCache, PatternError};
use crate::resolver::Resolver;

/// Owns the top-level view resolvers and tracks navigation history.
#[derive(Debug)]
pub struct RouteManager {
    cache: PatternCache,
    views: Vec<Resolver>,
    history: VecDeque<PushEvent>,
    use_hash: bool,
    history_limit: usize,
}

impl RouteManager {
    /// Create a manager with its own pattern cache. A `history_limit` of 0
    /// is raised to 1, see [`RouteManager::with_cache`].
    pub fn new(navigation: &NavigationConfig) -> Self {
        Self::with_cache(navigation, PatternCache::new())
    }

    /// Create a manager that compiles patterns through an existing cache.
    ///
    /// A `history_limit` of 0 is raised to 1 so the current location is
    /// always kept; `validate_config` rejects 0 in routes files.
    pub fn with_cache(navigation: &NavigationConfig, cache: PatternCache) -> Self {
        Self {
            cache,
            views: Vec::new(),
            history: VecDeque::new(),
            use_hash: navigation.use_hash,
            history_limit: navigation.history_limit.max(1),
        }
    }

    /// Build the view tree described by `config`.
    pub fn from_config(config: &RouterConfig) -> Result<Self, PatternError> {
        let mut manager = Self::new(&config.navigation);
        for route in &config.routes {
            let view = build_route(&manager.cache, route)?;
            manager.views.push(view);
        }

        tracing::info!(
            views = manager.views.len(),
            patterns = manager.cache.len(),
            use_hash = manager.use_hash,
            "Route tree built"
        );
        Ok(manager)
    }

    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Mount a top-level view. The returned resolver can be used to
    /// subscribe and register children.
    pub fn mount(&mut self, name: &str, pattern: &str) -> Result<&mut Resolver, PatternError> {
        let view = Resolver::with_cache(&self.cache, pattern)?.named(name);
        let index = self.views.len();
        self.views.push(view);
        Ok(&mut self.views[index])
    }

    /// Compile `pattern` through this manager's cache into an unattached
    /// resolver, ready to be registered under a view.
    pub fn resolver(&self, pattern: &str) -> Result<Resolver, PatternError> {
        Resolver::with_cache(&self.cache, pattern)
    }

    pub fn views(&self) -> &[Resolver] {
        &self.views
    }

    pub fn view_mut(&mut self, name: &str) -> Option<&mut Resolver> {
        self.views.iter_mut().find(|v| v.label() == name)
    }

    /// Resolve `event` against every view and return the names of those
    /// that matched.
    pub fn activate(&mut self, event: PushEvent) -> Vec<String> {
        let active: Vec<String> = self
            .views
            .iter()
            .filter(|view| view.resolve(&event))
            .map(|view| view.label().to_string())
            .collect();

        tracing::info!(
            location = %event.location(),
            active = ?active,
            "Views activated"
        );
        metrics::record_activation(active.len());

        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(event);

        active
    }

    /// Build an event for `location` (path or hash, per configuration) and
    /// activate it.
    pub fn navigate(&mut self, location: &str) -> Result<Vec<String>, EventError> {
        let event = PushEvent::new(location, self.use_hash)?;
        Ok(self.activate(event))
    }

    /// The most recently activated event.
    pub fn location(&self) -> Option<&PushEvent> {
        self.history.back()
    }

    /// Past events, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &PushEvent> {
        self.history.iter()
    }

    pub fn uses_hash(&self) -> bool {
        self.use_hash
    }

    /// Visit every resolver of every view in pre-order.
    pub fn walk_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Resolver),
    {
        for view in &mut self.views {
            view.walk_mut(f);
        }
    }

    /// Visit every resolver of every view in pre-order with its depth.
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&Resolver, usize),
    {
        for view in &self.views {
            view.walk(f);
        }
    }
}

fn build_route(cache: &PatternCache, route: &RouteConfig) -> Result<Resolver, PatternError> {
    let mut resolver = Resolver::with_cache(cache, &route.pattern)?.named(&route.name);
    for child in &route.children {
        resolver.register(build_route(cache, child)?);
    }
    Ok(resolver)
}
