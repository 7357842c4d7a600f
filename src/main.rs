//! orgmap CLI - companion for the organization directory API

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod org;
mod output;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Init => cli::init::run(cli.config.as_deref(), cli.api_host.clone()).await,
        Commands::Status => cli::status::run(cli.config.as_deref()),
        Commands::Ingest { flatten } => {
            cli::ingest::run(
                cli.format,
                flatten,
                cli.api_host.as_deref(),
                cli.config.as_deref(),
            )
            .await
        }
        Commands::Version => {
            println!("orgmap version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
