//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for the CLI
//! - Honour `RUST_LOG` over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log levels accepted in configuration and on the command line.
pub const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Returns true if `level` is one of [`LEVELS`] (case-insensitive).
pub fn is_valid_level(level: &str) -> bool {
    LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level))
}

/// Build the filter used by [`init`].
///
/// `RUST_LOG` wins when set; otherwise only this crate logs at `level`.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("view_router={}", level.to_ascii_lowercase())))
}

/// Install the global subscriber. Logs go to stderr so stdout stays
/// machine-readable.
pub fn init(level: &str) {
    let result = tracing_subscriber::registry()
        .with(filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_validation() {
        assert!(is_valid_level("info"));
        assert!(is_valid_level("DEBUG"));
        assert!(!is_valid_level("verbose"));
        assert!(!is_valid_level(""));
    }
}
