use anyhow::Result;
use clap::Parser;
use tokenkit_cli::{cli::Cli, config::FileConfig, run};
use tokenkit_telemetry::init_with_config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = FileConfig::load(&cli.config)?;
    init_with_config(config.telemetry(cli.log_level.as_deref()))?;

    run(cli, config).await
}
