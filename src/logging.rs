//! Installs the global [`tracing`] subscriber. Logs go to stderr and are
//! filtered by `RUST_LOG`, defaulting to `warn` so that a successful run is
//! silent.

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";

/// Initialises the global tracing subscriber. Fails if one is already set.
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise tracing: {}", e))
}
