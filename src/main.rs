use anyhow::Context;
use clap::Parser;
use coinpulse::adapter::inbound::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    run::execute(&cli)
        .await
        .with_context(|| format!("coinpulse failed (config: {})", cli.config.display()))
}
