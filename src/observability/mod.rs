//! Observability module for the Stability client.
//!
//! Service calls are instrumented with `tracing` spans; [`init_tracing`]
//! installs a `tracing-subscriber` for applications that do not set one up
//! themselves. The [`Logger`] trait receives one line per outbound request.

mod logging;

pub use logging::{ConsoleLogger, LogConfig, LogLevel, Logger, NoopLogger};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match (config.json, config.include_timestamps) {
        (true, _) => registry.with(fmt::layer().json()).try_init(),
        (false, true) => registry.with(fmt::layer().with_target(false)).try_init(),
        (false, false) => registry
            .with(fmt::layer().with_target(false).without_time())
            .try_init(),
    };

    result.map_err(|e| e.to_string())
}
