mod cli;
mod commands;
mod config;
mod main_lib;

use clap::Parser;

use cli::Cli;
use config::Config;
use main_lib::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = cli.data_file {
        config.data_file = path;
    }
    init_tracing(&config.log_format);

    commands::run(cli.command, &config).await
}
