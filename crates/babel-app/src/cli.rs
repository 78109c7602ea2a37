use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Caching translation gateway with upstream failover
#[derive(Parser, Debug)]
#[command(name = "babel", version)]
pub struct Cli {
    /// JSON config file; environment variables are used when absent
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate one or more phrases
    Translate(TranslateArgs),
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Language of the given phrases, e.g. "de"
    #[arg(long)]
    pub from: String,

    /// Language to translate into, e.g. "en-US"
    #[arg(long)]
    pub to: String,

    #[arg(required = true)]
    pub phrases: Vec<String>,
}
