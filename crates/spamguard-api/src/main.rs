//! SpamGuard
//!
//! Classifies email messages as spam or ham over HTTP.

use anyhow::Result;
use clap::Parser;
use spamguard_api::cli::{Cli, Commands};
use spamguard_api::server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::serve(args).await,
        Commands::DeployModels {
            source,
            config,
            target,
            verbose,
        } => server::deploy_models(&source, &config, target.as_deref(), verbose),
    }
}
