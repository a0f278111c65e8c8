//! Shared pattern compilation cache.

use std::sync::Arc;

use dashmap::DashMap;

use crate::observability::metrics;
use crate::pattern::segment::{Pattern, PatternError};

/// A thread-safe cache of compiled patterns keyed by their source string.
///
/// Cloning the cache is cheap and clones share the same map, so one cache can
/// be handed to every component that builds resolvers at startup.
#[derive(Debug, Clone, Default)]
pub struct PatternCache {
    inner: Arc<DashMap<String, Arc<Pattern>>>,
}

impl PatternCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled pattern for `raw`, compiling it on first use.
    ///
    /// Invalid sources are not cached.
    pub fn get_or_compile(&self, raw: &str) -> Result<Arc<Pattern>, PatternError> {
        if let Some(existing) = self.inner.get(raw) {
            metrics::record_cache_lookup(true);
            return Ok(Arc::clone(existing.value()));
        }

        metrics::record_cache_lookup(false);
        let compiled = Arc::new(Pattern::compile(raw)?);

        // Two threads can race past the lookup above; the entry API keeps the
        // first insert so every caller ends up with the same instance.
        let pattern = Arc::clone(
            self.inner
                .entry(raw.to_string())
                .or_insert(compiled)
                .value(),
        );
        metrics::record_cache_size(self.inner.len());
        tracing::trace!(pattern = %raw, "Compiled pattern");

        Ok(pattern)
    }

    /// Check whether `raw` has already been compiled.
    pub fn contains(&self, raw: &str) -> bool {
        self.inner.contains_key(raw)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_reuses_compiled_pattern() {
        let cache = PatternCache::new();
        assert!(cache.is_empty());

        let first = cache.get_or_compile("/home/*").unwrap();
        let second = cache.get_or_compile("/home/*").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.get_or_compile("/:id").unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("/:id"));
    }

    #[test]
    fn test_invalid_pattern_not_cached() {
        let cache = PatternCache::new();
        assert!(cache.get_or_compile("/*/x").is_err());
        assert!(!cache.contains("/*/x"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = PatternCache::new();
        let clone = cache.clone();
        let a = cache.get_or_compile("/a").unwrap();
        let b = clone.get_or_compile("/a").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_concurrent_compilation_yields_one_instance() {
        let cache = PatternCache::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.get_or_compile("/shared/:id").unwrap())
            })
            .collect();

        let patterns: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(patterns.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(cache.len(), 1);
    }
}
