//! Tracing subscriber setup
//!
//! Installs a `tracing-subscriber` fmt layer filtered by `RUST_LOG` (falling
//! back to a configurable directive). JSON output is selected with
//! `GYM_REVIEW_LOG_FORMAT=json`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable selecting the output format
pub const LOG_FORMAT_ENV: &str = "GYM_REVIEW_LOG_FORMAT";

/// Subscriber options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Filter used when `RUST_LOG` is unset or invalid
    pub default_directive: String,
    pub json: bool,
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self { default_directive: "info".to_string(), json: false, with_target: true }
    }
}

impl TracingConfig {
    /// Defaults, with the format taken from `GYM_REVIEW_LOG_FORMAT`
    #[must_use]
    pub fn from_env() -> Self {
        let json = std::env::var(LOG_FORMAT_ENV)
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        Self { json, ..Self::default() }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_directive))
    }
}

/// Install the global subscriber
///
/// # Errors
/// Returns `TryInitError` if a global subscriber is already set
pub fn init_tracing(config: &TracingConfig) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(config.filter());

    if config.json {
        registry.with(fmt::layer().json().with_target(config.with_target)).try_init()
    } else {
        registry.with(fmt::layer().with_target(config.with_target)).try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = TracingConfig { default_directive: "debug".to_string(), ..TracingConfig::default() };
        // Another test may have installed a subscriber first
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.default_directive, "info");
        assert!(!config.json);
    }
}
