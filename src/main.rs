//! pulse: a synthetic real-time analytics dashboard for the terminal.
//!
//! Run with:  `RUST_LOG=info pulse`

use anyhow::Result;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging on stderr so frames own stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("pulse v{} starting", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(pulse_runtime::run());

    // The stdin reader parks in a blocking read that cannot be cancelled.
    runtime.shutdown_timeout(Duration::from_millis(100));

    result.map_err(Into::into)
}
