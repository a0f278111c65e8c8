//! View activation.
//!
//! # Data Flow
//! ```text
//! location string
//!     → PushEvent (path or hash, per NavigationConfig)
//!     → every mounted view resolver, in mount order
//!         → matching views notify their observers and descend into children
//!         → non-matching views notify their failure observers
//!     → names of the active views + event appended to bounded history
//! ```
//!
//! # Design Decisions
//! - Views are top-level resolvers; all of them are asked on every activation
//! - One pattern cache per manager, shared by every resolver it builds
//! - History is bounded; the oldest event is dropped first

pub mod views;

pub use views::RouteManager;
