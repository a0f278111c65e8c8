//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pattern cache, resolvers, route manager produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters and gauges through the `metrics` facade)
//!
//! Consumers:
//!     → stderr via tracing-subscriber (CLI)
//!     → Prometheus scrape endpoint (watch mode, optional)
//! ```
//!
//! # Design Decisions
//! - Library code only emits; installing subscribers/recorders is left to the binary
//! - Without an installed recorder every metric call is a no-op

pub mod logging;
pub mod metrics;
