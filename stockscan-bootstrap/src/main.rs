use anyhow::Result;
use clap::Parser;

use stockscan_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "stockscan")]
#[command(about = "Inbound stock scan server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("STOCKSCAN_CONFIG", config);
    }

    let config = AppConfig::load().await?;
    // Dropping the guard stops the file writer; keep it for the whole run.
    let _log_guard = stockscan_bootstrap::logging::init(config.log_dir.as_deref())?;

    stockscan_bootstrap::run_standalone(config).await
}
