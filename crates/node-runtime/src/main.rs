//! # Transport Node
//!
//! Runs one node of the constitutional transport layer in-process.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install the `tracing` subscriber at the configured level
//! 3. Open and verify the envelope log
//! 4. Wire keys, envelope engine, router and dispatch ports
//! 5. Drive sample traffic through the router
//! 6. Re-verify the log and exit

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use node_runtime::{NodeConfig, NodeRuntime};

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("Invalid MCP_LOG_LEVEL '{level}'"))?;
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("Invalid node configuration")?;
    init_logging(&config.log_level)?;

    info!("===========================================");
    info!("  Constitutional Transport Node v{}", env!("CARGO_PKG_VERSION"));
    info!("  Node: {}", config.node_id);
    info!("  Log:  {}", config.log_path.display());
    info!("===========================================");

    let runtime = NodeRuntime::new(config)?;
    let deliveries = runtime.run_sample_traffic().await?;

    let routed = deliveries.iter().filter(|d| d.result.success).count();
    let replies = deliveries.iter().filter(|d| d.reply.is_some()).count();
    info!(
        sent = deliveries.len(),
        routed,
        error_replies = replies,
        "[Node] sample traffic complete"
    );

    runtime.shutdown()
}
