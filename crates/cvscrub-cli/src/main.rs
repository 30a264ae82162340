mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries scrubbed documents, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Scrub(args) => commands::scrub::handle(args).await,
        cli::Commands::Restore { scrubbed, mapping } => {
            commands::restore::handle(&scrubbed, &mapping).await
        }
        cli::Commands::Init { force } => commands::init::handle(force).await,
    }
}
