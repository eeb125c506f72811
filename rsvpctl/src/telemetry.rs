//! Tracing initialization: a fmt subscriber filtered by `RUST_LOG`.
//!
//! Without `RUST_LOG` the filter defaults to `info`, or `debug` when `debug_enabled` is
//! set in the configuration.

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn default_directive(debug_enabled: bool) -> &'static str {
    if debug_enabled { "debug" } else { "info" }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_telemetry(debug_enabled: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(debug_enabled)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!(debug_enabled, "Telemetry initialized");
    Ok(())
}
