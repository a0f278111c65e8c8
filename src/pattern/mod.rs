//! Path pattern subsystem.
//!
//! # Data Flow
//! ```text
//! Pattern source ("/home/:id/*")
//!     → segment.rs (compile into Literal / Param / Wildcard segments)
//!     → cache.rs (share one compiled Arc<Pattern> per source string)
//!     → Pattern::matches(path) → Option<PathMatch>
//! ```
//!
//! # Design Decisions
//! - Patterns compile once and are immutable afterwards
//! - Literal segments are case-sensitive
//! - A wildcard may only appear as the last segment
//! - One leading and trailing `/` is insignificant on both sides

pub mod cache;
pub mod segment;

pub use cache::PatternCache;
pub use segment::{PathMatch, Pattern, PatternError, Segment};
