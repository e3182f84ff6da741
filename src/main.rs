//! pillbar: a pill-shaped, layer-composited progress bar demo.
//!
//! Run with:  `RUST_LOG=debug pillbar`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("pillbar v{} starting", env!("CARGO_PKG_VERSION"));

    pillbar_app::run().map_err(Into::into)
}
