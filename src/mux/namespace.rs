//! Namespace muxes and the first-match multiplexer.

use std::sync::Arc;

use thiserror::Error;

use crate::config::schema::MuxConfig;
use crate::pattern::{Pattern, PatternCache, PatternError};

/// Errors returned by [`Multiplexer::route`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MuxError {
    #[error("no mux found for {0}")]
    NotFound(String),
}

/// Turn a namespace into its wildcard pattern (`/github` → `/github/*`).
pub fn namespace_pattern(namespace: &str) -> String {
    if namespace == "*" || namespace.ends_with("/*") {
        namespace.to_string()
    } else {
        format!("{}/*", namespace.trim_end_matches('/'))
    }
}

/// Strips a namespace from matching paths and optionally rewrites them.
#[derive(Debug, Clone)]
pub struct Mux {
    name: String,
    namespace: Arc<Pattern>,
    rewrite: Option<String>,
}

impl Mux {
    pub fn new(name: impl Into<String>, namespace: &str) -> Result<Self, PatternError> {
        Ok(Self::from_pattern(
            name,
            Arc::new(Pattern::compile(&namespace_pattern(namespace))?),
        ))
    }

    pub fn with_cache(
        cache: &PatternCache,
        name: impl Into<String>,
        namespace: &str,
    ) -> Result<Self, PatternError> {
        Ok(Self::from_pattern(
            name,
            cache.get_or_compile(&namespace_pattern(namespace))?,
        ))
    }

    fn from_pattern(name: impl Into<String>, namespace: Arc<Pattern>) -> Self {
        Self {
            name: name.into(),
            namespace,
            rewrite: None,
        }
    }

    /// Prefix prepended to the stripped remainder.
    pub fn with_rewrite(mut self, prefix: impl Into<String>) -> Self {
        self.rewrite = Some(prefix.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &Pattern {
        &self.namespace
    }

    /// The path handed to the external handler, or `None` when `path` is
    /// outside this namespace.
    pub fn rewrite(&self, path: &str) -> Option<String> {
        let m = self.namespace.matches(path)?;
        Some(match &self.rewrite {
            None => m.remainder,
            Some(prefix) if m.remainder.is_empty() => prefix.clone(),
            Some(prefix) => format!("{}/{}", prefix.trim_end_matches('/'), m.remainder),
        })
    }
}

/// An ordered set of muxes; the first one to match handles the path.
#[derive(Debug, Clone, Default)]
pub struct Multiplexer {
    muxes: Vec<Mux>,
}

impl Multiplexer {
    pub fn new(muxes: Vec<Mux>) -> Self {
        Self { muxes }
    }

    /// Build from config entries, compiling namespaces through `cache`.
    pub fn from_config(cache: &PatternCache, configs: &[MuxConfig]) -> Result<Self, PatternError> {
        let muxes = configs
            .iter()
            .map(|c| {
                let mux = Mux::with_cache(cache, &c.name, &c.namespace)?;
                Ok(match &c.rewrite {
                    Some(prefix) => mux.with_rewrite(prefix),
                    None => mux,
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;
        Ok(Self::new(muxes))
    }

    pub fn push(&mut self, mux: Mux) {
        self.muxes.push(mux);
    }

    pub fn len(&self) -> usize {
        self.muxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.muxes.is_empty()
    }

    /// Return the name of the first matching mux and the rewritten path.
    pub fn route(&self, path: &str) -> Result<(&str, String), MuxError> {
        self.muxes
            .iter()
            .find_map(|mux| mux.rewrite(path).map(|rewritten| (mux.name(), rewritten)))
            .ok_or_else(|| MuxError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_pattern() {
        assert_eq!(namespace_pattern("/github"), "/github/*");
        assert_eq!(namespace_pattern("/github/"), "/github/*");
        assert_eq!(namespace_pattern("/github/*"), "/github/*");
        assert_eq!(namespace_pattern("*"), "*");
        assert_eq!(namespace_pattern(""), "/*");
    }

    #[test]
    fn test_mux_strips_namespace() {
        let mux = Mux::new("github", "github").unwrap();
        assert_eq!(mux.rewrite("github/gu-io/buba").as_deref(), Some("gu-io/buba"));
        assert_eq!(mux.rewrite("/github").as_deref(), Some(""));
        assert!(mux.rewrite("/gitlab/x").is_none());
    }

    #[test]
    fn test_mux_rewrite_prefix() {
        let mux = Mux::new("github", "/github").unwrap().with_rewrite("github.com/");
        assert_eq!(
            mux.rewrite("/github/gu-io/buba").as_deref(),
            Some("github.com/gu-io/buba")
        );
        assert_eq!(mux.rewrite("/github").as_deref(), Some("github.com/"));
    }

    #[test]
    fn test_first_match_wins() {
        let mux = Multiplexer::new(vec![
            Mux::new("api-v1", "/api/v1").unwrap(),
            Mux::new("api", "/api").unwrap(),
            Mux::new("fallback", "/").unwrap(),
        ]);

        assert_eq!(mux.route("/api/v1/users").unwrap(), ("api-v1", "users".to_string()));
        assert_eq!(mux.route("/api/v2/users").unwrap(), ("api", "v2/users".to_string()));
        assert_eq!(mux.route("/other").unwrap(), ("fallback", "other".to_string()));
    }

    #[test]
    fn test_not_found() {
        let mux = Multiplexer::new(vec![Mux::new("api", "/api").unwrap()]);
        assert_eq!(
            mux.route("/web/index"),
            Err(MuxError::NotFound("/web/index".to_string()))
        );
        assert!(Multiplexer::default().route("/").is_err());
    }

    #[test]
    fn test_from_config_uses_cache() {
        let cache = PatternCache::new();
        let configs = vec![
            MuxConfig {
                name: "gh".into(),
                namespace: "/github".into(),
                rewrite: Some("github.com".into()),
            },
            MuxConfig {
                name: "gh2".into(),
                namespace: "/github/*".into(),
                rewrite: None,
            },
        ];
        let mux = Multiplexer::from_config(&cache, &configs).unwrap();
        assert_eq!(mux.len(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            mux.route("/github/a").unwrap(),
            ("gh", "github.com/a".to_string())
        );
    }
}
