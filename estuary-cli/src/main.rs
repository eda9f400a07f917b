//! Estuary CLI - inspect and export estuary point data from the command line.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "estuary-cli",
    version,
    about = "Estuary microplastics point data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: estuary_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    estuary_cmd::run(cli.command).await
}
