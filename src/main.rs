use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use igindex::cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    run(cli).await
}
