//! Pattern compilation and matching.
//!
//! # Responsibilities
//! - Parse a pattern source into typed segments
//! - Reject malformed sources up front
//! - Match a path against the compiled segments (pure, no allocation on mismatch
//!   beyond the token split)

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// One compiled piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path token exactly (case-sensitive).
    Literal(String),
    /// Binds the path token to the given name.
    Param(String),
    /// Captures every remaining token. Always the last segment.
    Wildcard,
}

/// Errors produced while compiling a pattern.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern {pattern:?}: parameter at segment {position} has no name")]
    EmptyParam { pattern: String, position: usize },

    #[error("pattern {pattern:?}: invalid parameter name {name:?}")]
    InvalidParamName { pattern: String, name: String },

    #[error("pattern {pattern:?}: parameter {name:?} is declared more than once")]
    DuplicateParam { pattern: String, name: String },

    #[error("pattern {pattern:?}: wildcard must be the last segment")]
    MisplacedWildcard { pattern: String },

    #[error("pattern {pattern:?}: empty segment at position {position}")]
    EmptySegment { pattern: String, position: usize },
}

/// Outcome of a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathMatch {
    /// Named parameters bound by `:name` segments.
    pub params: HashMap<String, String>,
    /// The consumed prefix, always starting with `/`.
    pub matched: String,
    /// Tokens left over for a trailing wildcard, joined with `/`. Empty when
    /// the pattern has no wildcard.
    pub remainder: String,
}

/// A compiled path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a pattern source.
    ///
    /// An empty source is the catch-all pattern, equivalent to `/*`. `/` on its
    /// own only matches the root.
    pub fn compile(raw: &str) -> Result<Self, PatternError> {
        let source = raw.to_string();
        if raw.is_empty() {
            return Ok(Self {
                source,
                segments: vec![Segment::Wildcard],
            });
        }

        let body = trim_slashes(raw);
        let mut segments = Vec::new();
        if body.is_empty() {
            return Ok(Self { source, segments });
        }

        let parts: Vec<&str> = body.split('/').collect();
        let last = parts.len() - 1;

        for (position, part) in parts.iter().enumerate() {
            let segment = match *part {
                "" => {
                    return Err(PatternError::EmptySegment {
                        pattern: source,
                        position,
                    })
                }
                "*" if position == last => Segment::Wildcard,
                "*" => return Err(PatternError::MisplacedWildcard { pattern: source }),
                token => match token.strip_prefix(':') {
                    Some("") => {
                        return Err(PatternError::EmptyParam {
                            pattern: source,
                            position,
                        })
                    }
                    Some(name) => {
                        if !is_valid_param_name(name) {
                            return Err(PatternError::InvalidParamName {
                                pattern: source,
                                name: name.to_string(),
                            });
                        }
                        if segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                        {
                            return Err(PatternError::DuplicateParam {
                                pattern: source,
                                name: name.to_string(),
                            });
                        }
                        Segment::Param(name.to_string())
                    }
                    None => Segment::Literal(token.to_string()),
                },
            };
            segments.push(segment);
        }

        Ok(Self { source, segments })
    }

    /// The source string this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True if the pattern ends with `*`.
    pub fn has_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    /// True for `/*` and the empty pattern.
    pub fn is_catch_all(&self) -> bool {
        self.segments == [Segment::Wildcard]
    }

    /// Names bound by this pattern, in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Match `path` against this pattern.
    pub fn matches(&self, path: &str) -> Option<PathMatch> {
        let body = trim_slashes(path);
        let tokens: Vec<&str> = if body.is_empty() {
            Vec::new()
        } else {
            body.split('/').collect()
        };

        let fixed = self.fixed_len();
        if tokens.len() < fixed || (!self.has_wildcard() && tokens.len() != fixed) {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, token) in self.segments.iter().zip(tokens.iter()) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != token {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if token.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), (*token).to_string());
                }
                Segment::Wildcard => break,
            }
        }

        Some(PathMatch {
            params,
            matched: format!("/{}", tokens[..fixed].join("/")),
            remainder: tokens[fixed..].join("/"),
        })
    }

    /// Number of segments that consume exactly one token.
    fn fixed_len(&self) -> usize {
        if self.has_wildcard() {
            self.segments.len() - 1
        } else {
            self.segments.len()
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

fn trim_slashes(s: &str) -> &str {
    let s = s.strip_prefix('/').unwrap_or(s);
    s.strip_suffix('/').unwrap_or(s)
}

fn is_valid_param_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern_matches_only_itself() {
        let pattern = Pattern::compile("/home/about").unwrap();

        assert!(pattern.matches("/home/about").is_some());
        assert!(pattern.matches("home/about").is_some());
        assert!(pattern.matches("/home/about/").is_some());
        assert!(pattern.matches("/home").is_none());
        assert!(pattern.matches("/home/about/team").is_none());
        assert!(pattern.matches("/Home/About").is_none()); // Case sensitive
    }

    #[test]
    fn test_param_binding() {
        let pattern = Pattern::compile("/:id").unwrap();

        let m = pattern.matches("/12").unwrap();
        assert_eq!(m.params.get("id").map(String::as_str), Some("12"));
        assert_eq!(m.matched, "/12");
        assert_eq!(m.remainder, "");

        // Leading slash is optional on the input
        let m = pattern.matches("12").unwrap();
        assert_eq!(m.params["id"], "12");

        assert!(pattern.matches("/home/12").is_none());
        assert!(pattern.matches("/").is_none());
    }

    #[test]
    fn test_wildcard_remainder() {
        let pattern = Pattern::compile("/home/*").unwrap();

        let m = pattern.matches("/home/models/12").unwrap();
        assert_eq!(m.matched, "/home");
        assert_eq!(m.remainder, "models/12");
        assert!(m.params.is_empty());

        // Wildcard may capture nothing
        let m = pattern.matches("/home").unwrap();
        assert_eq!(m.remainder, "");

        assert!(pattern.matches("/index/models").is_none());
    }

    #[test]
    fn test_catch_all() {
        for raw in ["/*", "*", ""] {
            let pattern = Pattern::compile(raw).unwrap();
            assert!(pattern.is_catch_all(), "{raw:?} should be a catch-all");

            let m = pattern.matches("/home/12").unwrap();
            assert_eq!(m.matched, "/");
            assert_eq!(m.remainder, "home/12");
            assert!(pattern.matches("/").is_some());
        }
    }

    #[test]
    fn test_root_pattern() {
        let pattern = Pattern::compile("/").unwrap();
        assert!(!pattern.is_catch_all());
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("").is_some());
        assert!(pattern.matches("/home").is_none());
    }

    #[test]
    fn test_mixed_segments() {
        let pattern = Pattern::compile("/users/:user/posts/:post/*").unwrap();
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["user", "post"]);

        let m = pattern.matches("/users/ada/posts/7/comments/3").unwrap();
        assert_eq!(m.params["user"], "ada");
        assert_eq!(m.params["post"], "7");
        assert_eq!(m.matched, "/users/ada/posts/7");
        assert_eq!(m.remainder, "comments/3");
    }

    #[test]
    fn test_matching_is_idempotent() {
        let pattern = Pattern::compile("/home/:id/*").unwrap();
        let first = pattern.matches("/home/4/a/b");
        let second = pattern.matches("/home/4/a/b");
        assert_eq!(first, second);
    }

    #[test]
    fn test_param_rejects_empty_token() {
        let pattern = Pattern::compile("/a/:id/b").unwrap();
        assert!(pattern.matches("/a//b").is_none());
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(
            Pattern::compile("/home/:"),
            Err(PatternError::EmptyParam { position: 1, .. })
        ));
        assert!(matches!(
            Pattern::compile("/:user-id"),
            Err(PatternError::InvalidParamName { .. })
        ));
        assert!(matches!(
            Pattern::compile("/:id/x/:id"),
            Err(PatternError::DuplicateParam { .. })
        ));
        assert!(matches!(
            Pattern::compile("/*/home"),
            Err(PatternError::MisplacedWildcard { .. })
        ));
        assert!(matches!(
            Pattern::compile("/home//about"),
            Err(PatternError::EmptySegment { position: 1, .. })
        ));
    }

    #[test]
    fn test_display_and_from_str() {
        let pattern: Pattern = "/home/:id".parse().unwrap();
        assert_eq!(pattern.to_string(), "/home/:id");
        assert_eq!(pattern.source(), "/home/:id");
    }
}
