use std::path::PathBuf;

use clap::Parser;
use cortex_rt::{Runtime, RuntimeConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cortex", version, about = "Sensor-fusing, action-dispatching agent runtime")]
struct Cli {
    /// Path to the mode configuration TOML
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Mode to run, for multi-mode configuration documents. Falls back to
    /// the document's `default_mode` when omitted.
    #[arg(long)]
    mode: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = RuntimeConfig::from_path(&cli.config)
        .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", cli.config.display()))?;
    let mode = config
        .resolve(cli.mode.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to resolve mode: {e}"))?
        .clone();

    let runtime = Runtime::build(mode).map_err(|e| anyhow::anyhow!("failed to build runtime: {e}"))?;
    let stop = runtime.stop_signal();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            stop.stop();
        }
    });

    runtime.run().await;
    Ok(())
}
