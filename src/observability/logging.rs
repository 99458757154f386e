//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Resolve the log filter from `RUST_LOG`, CLI and config
//!
//! # Design Decisions
//! - `RUST_LOG` wins when set, so operators can always dig deeper
//! - Otherwise the configured level applies to this crate only

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter directive for a bare level such as `"debug"`.
///
/// Full directives (containing `=` or `,`) are passed through untouched.
pub fn default_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("http_basics={}", level.to_ascii_lowercase())
    }
}

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(level).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_crate() {
        assert_eq!(default_directive("DEBUG"), "http_basics=debug");
    }

    #[test]
    fn full_directive_passes_through() {
        assert_eq!(default_directive("http_basics=trace,reqwest=info"), "http_basics=trace,reqwest=info");
    }
}
