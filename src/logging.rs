//! Subscriber setup for embedders that want the engine's default logging.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install a `fmt` subscriber. `RUST_LOG` overrides the configured filter.
/// Does nothing when a global subscriber is already set.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber already installed");
    }
}
