//! Logging setup.
//!
//! Installs a global `tracing` subscriber built from a [`LogConfig`]. `RUST_LOG`, when
//! set, takes precedence over the configured level.

use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::config::LogConfig;
use crate::error::{KonaError, KonaResult};

/// Build the level filter for `config`, preferring `RUST_LOG` when present.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the global logging system.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> KonaResult<()> {
    let fmt_layer = if config.json {
        fmt::layer()
            .json()
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .with_thread_names(true)
            .boxed()
    };

    Registry::default()
        .with(env_filter(config))
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| KonaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}
