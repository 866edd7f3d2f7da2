//! Airwave CLI - Command-line interface
//!
//! Provides command-line access to the scheduling engine.

mod commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "airwave")]
#[command(about = "A rights-aware broadcast scheduler")]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    commands::handle_command(cli.command).await?;

    Ok(())
}
