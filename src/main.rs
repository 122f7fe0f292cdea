use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use cryptodev_exchange::application::{Cli, CommandExecutor};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = format!("{:?}", cli.command);

    CommandExecutor::execute(cli)
        .await
        .with_context(|| format!("command failed: {}", command))
}
