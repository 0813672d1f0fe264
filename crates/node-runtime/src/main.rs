//! # Gravity-Chain Node
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, optional TOML file, `GC_*` environment)
//! 2. Initialize logging
//! 3. Build services and load persisted sporks
//! 4. Start message handlers
//! 5. Run until Ctrl+C, then shut down gracefully
//!
//! The config file path is the first command-line argument or `GC_CONFIG`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use node_runtime::{NodeConfig, NodeRuntime};

fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("GC_CONFIG").map(PathBuf::from))
}

fn init_logging(config: &NodeConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install tracing subscriber")
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::load(config_path().as_deref()).context("failed to load configuration")?;
    init_logging(&config)?;

    info!("===========================================");
    info!("  Gravity-Chain Node v{}", env!("CARGO_PKG_VERSION"));
    info!("  Network: {}", config.network);
    info!("===========================================");

    let runtime = NodeRuntime::new(&config)?;
    runtime.start()?;

    // Outbound traffic belongs to the peer and chain layers; until they are
    // attached, log it.
    if let Some(mut outbound) = runtime.take_outbound() {
        tokio::spawn(async move {
            while let Some(message) = outbound.recv().await {
                info!(?message, "Outbound");
            }
        });
    }

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}
