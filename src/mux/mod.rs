//! Namespace multiplexing.
//!
//! # Data Flow
//! ```text
//! path ("/github/gu-io/buba")
//!     → Multiplexer tries each Mux in order
//!     → first Mux whose namespace ("/github/*") matches wins
//!     → remainder ("gu-io/buba"), optionally prefixed by the rewrite
//!       ("github.com/gu-io/buba")
//!     → Return: (mux name, rewritten path) or MuxError::NotFound
//! ```
//!
//! # Design Decisions
//! - First match wins, unlike the resolver tree which fans out to every child
//! - Namespaces are normalised to end in `/*`
//! - Patterns come from the shared pattern cache when one is supplied

pub mod namespace;

pub use namespace::{namespace_pattern, Multiplexer, Mux, MuxError};
