//! Navigation events.
//!
//! A [`PushEvent`] is created once per navigation from a location string and
//! then narrowed level by level as resolvers consume the matched prefix.
//!
//! ```text
//! "http://host/#home/models/12"
//!     → PushEvent { remainder: "home/models/12", matched: "" }
//!     → "/home/*" matches → descend → { matched: "/home", remainder: "models/12" }
//!     → "/models/*" matches → descend → { matched: "/home/models", remainder: "12" }
//! ```

pub mod push;

pub use push::{EventError, EventSource, PushEvent};
