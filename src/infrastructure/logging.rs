//! Logging initialization
//!
//! Console logging via `tracing-subscriber`. The level is controlled by
//! `RUST_LOG`, defaulting to `info`.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Initialize the logging system. Call once at startup.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
