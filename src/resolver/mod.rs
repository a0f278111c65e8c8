//! Hierarchical route resolution.
//!
//! # Data Flow
//! ```text
//! PushEvent (remainder = "/home/12")
//!     → node.rs: Resolver("/home/*").resolve
//!         → pattern match on remainder
//!         → matched: observer.rs on_match(descended event) for every observer
//!                    then every child.resolve(descended event)
//!         → failed:  observer.rs on_fail(incoming event), children skipped
//! ```
//!
//! # Design Decisions
//! - Synchronous, single-threaded call chain; no locking inside the tree
//! - Parents own their children, so a resolver has at most one parent
//! - Siblings are never short-circuited: every child decides for itself
//! - Failure is a notification, not an error value

pub mod node;
pub mod observer;

pub use node::Resolver;
pub use observer::{OnFail, OnMatch, Outcome, Recorder, Resolution, RouteObserver};
