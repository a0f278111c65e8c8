//! The `PushEvent` snapshot and its constructors.

use std::collections::HashMap;
use std::fmt;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::pattern::PathMatch;

/// Base used to resolve bare paths such as `/home/12` or `#home`.
const RELATIVE_BASE: &str = "http://localhost/";

/// Where the routable part of a location was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// The URL path.
    Path,
    /// The URL fragment (`#...`).
    Hash,
}

/// Errors raised while building a [`PushEvent`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("invalid location {location:?}: {reason}")]
    InvalidLocation { location: String, reason: String },
}

/// An immutable record of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushEvent {
    location: String,
    host: String,
    path: String,
    hash: String,
    matched: String,
    remainder: String,
    params: HashMap<String, String>,
    source: EventSource,
}

impl PushEvent {
    /// Parse `location` into an event.
    ///
    /// Absolute URLs and bare paths are both accepted. A location is only
    /// read as a URL when it carries a host; anything else is anchored as a
    /// path, so `//home/12` and `home:12` keep every segment. With `use_hash`
    /// the fragment is the routable part, otherwise the path is. `path` and
    /// `hash` keep the percent-encoded form, the remainder is decoded.
    pub fn new(location: &str, use_hash: bool) -> Result<Self, EventError> {
        let invalid = |reason: String| EventError::InvalidLocation {
            location: location.to_string(),
            reason,
        };

        let (url, absolute) = match Url::parse(location) {
            Ok(url) if url.has_host() => (url, true),
            _ => {
                let base = Url::parse(RELATIVE_BASE).map_err(|e| invalid(e.to_string()))?;
                let anchored = format!("/{}", location.trim_start_matches('/'));
                let url = base.join(&anchored).map_err(|e| invalid(e.to_string()))?;
                (url, false)
            }
        };

        let host = if absolute {
            url.host_str().unwrap_or_default().to_string()
        } else {
            String::new()
        };
        let path = url.path().to_string();
        let hash = url.fragment().unwrap_or_default().to_string();

        let (remainder, source) = if use_hash {
            (decode(&hash), EventSource::Hash)
        } else {
            (decode(&path), EventSource::Path)
        };

        Ok(Self {
            location: location.to_string(),
            host,
            path,
            hash,
            matched: String::new(),
            remainder,
            params: HashMap::new(),
            source,
        })
    }

    /// Event routed on the URL path.
    pub fn from_path(location: &str) -> Result<Self, EventError> {
        Self::new(location, false)
    }

    /// Event routed on the URL fragment.
    pub fn from_hash(location: &str) -> Result<Self, EventError> {
        Self::new(location, true)
    }

    /// Build the event handed to the next level after `level` matched.
    ///
    /// The matched prefix accumulates, the remainder is replaced and params
    /// are merged with deeper levels winning on name clashes.
    pub fn descend(&self, level: &PathMatch) -> Self {
        let mut params = self.params.clone();
        params.extend(
            level
                .params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Self {
            matched: join_paths(&self.matched, &level.matched),
            remainder: level.remainder.clone(),
            params,
            ..self.clone()
        }
    }

    /// The location string the event was created from.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Host of an absolute location; empty for bare paths.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fragment without the leading `#`.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Prefix consumed by the resolvers that matched so far.
    pub fn matched(&self) -> &str {
        &self.matched
    }

    /// Part of the location still to be matched.
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn source(&self) -> EventSource {
        self.source
    }

    pub fn is_hash(&self) -> bool {
        self.source == EventSource::Hash
    }
}

impl fmt::Display for PushEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (remainder {:?})", self.location, self.remainder)
    }
}

/// Percent-decode a location part. Invalid UTF-8 is replaced, not rejected.
pub(crate) fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Anchor a bare path at `/` and decode it, the way [`PushEvent::new`]
/// treats the path of a bare location.
pub(crate) fn decode_path(raw: &str) -> String {
    decode(&format!("/{}", raw.trim_start_matches('/')))
}

fn join_paths(prefix: &str, suffix: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let suffix = suffix.trim_start_matches('/');
    match (prefix.is_empty(), suffix.is_empty()) {
        (true, true) => "/".to_string(),
        (false, true) => prefix.to_string(),
        (true, false) => format!("/{suffix}"),
        (false, false) => format!("{prefix}/{suffix}"),
    }
}
