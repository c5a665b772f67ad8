//! Structured logging facade.
//!
//! With the `tracing` feature the usual macros are re-exported so dependent
//! crates can log through `trellis_core::debug!` and friends. The
//! `tracing-json` feature adds [`init_json_logging`], which installs a JSON
//! formatter filtered by the `TRELLIS_LOG` environment variable.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "TRELLIS_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a global JSON subscriber.
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected() {
        // The first call may fail too if another test already installed one.
        let _ = init_json_logging();
        assert!(init_json_logging().is_err());
    }
}
