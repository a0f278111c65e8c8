//! Hierarchical route resolution for view activation.
//!
//! Locations are turned into [`PushEvent`]s and resolved against a tree of
//! [`Resolver`]s. Every resolver that is asked to match notifies its
//! observers of exactly one outcome, and a matching resolver forwards the
//! unmatched remainder to all of its children.
//!
//! ```
//! use std::sync::Arc;
//! use view_router::{PushEvent, Recorder, Resolver};
//!
//! let log = Recorder::new("item");
//! let mut home = Resolver::new("/home/*");
//! home.register(Resolver::new("/:id")).subscribe(Arc::new(log.clone()));
//!
//! home.resolve(&PushEvent::from_path("/home/12").unwrap());
//! assert_eq!(log.entries()[0].event.param("id"), Some("12"));
//! ```

// Core subsystems
pub mod event;
pub mod pattern;
pub mod resolver;

// Composition
pub mod manager;
pub mod mux;

// Cross-cutting concerns
pub mod config;
pub mod observability;
pub mod report;

pub use config::RouterConfig;
pub use event::{EventError, EventSource, PushEvent};
pub use manager::RouteManager;
pub use mux::{Multiplexer, Mux, MuxError};
pub use pattern::{PathMatch, Pattern, PatternCache, PatternError};
pub use resolver::{Outcome, Recorder, Resolution, Resolver, RouteObserver};
