use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spamguard")]
#[command(author, version, about = "Spam/ham email classifier served over HTTP")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the model artifacts and start the HTTP server
    Serve(ServeArgs),

    /// Copy trained artifacts from a training output directory into the models directory
    DeployModels {
        /// Directory the training run wrote its artifacts to
        #[arg(short, long, default_value = "notebooks/artifacts")]
        source: PathBuf,

        /// Configuration file naming the models directory and artifact files
        #[arg(short, long, default_value = "config.yaml", env = "SPAMGUARD_CONFIG")]
        config: String,

        /// Models directory override
        #[arg(short, long, env = "SPAMGUARD_MODELS_DIR")]
        target: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml", env = "SPAMGUARD_CONFIG")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long, env = "SPAMGUARD_LISTEN")]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "SPAMGUARD_PORT")]
    pub port: Option<u16>,

    /// Directory holding the model artifacts
    #[arg(short, long, env = "SPAMGUARD_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
