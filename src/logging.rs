//! Logging infrastructure for MapLink.
//!
//! The SDK logs through `tracing`; host applications that already install
//! their own subscriber can ignore this module. For standalone use,
//! [`init_logging`] sets up console output filtered via the `RUST_LOG`
//! environment variable.

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize console logging.
///
/// Defaults to INFO when `RUST_LOG` is not set. Returns an error when a
/// global subscriber is already installed.
pub fn init_logging() -> Result<(), String> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| format!("failed to install tracing subscriber: {}", e))
}
