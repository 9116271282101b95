use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "boxc",
    about = "Box-C: access-aware search indexing for repository content",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON repository fixture to read objects from
    #[arg(long, global = true, default_value = "repository.json")]
    pub repo: PathBuf,

    /// TOML indexer configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build and print the search document of one object
    Index(IndexArgs),
    /// Reindex a subtree (the whole repository by default)
    Reindex(ReindexArgs),
    /// Show the effective access of one object
    Acl(AclArgs),
}

#[derive(Args)]
pub struct IndexArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ReindexArgs {
    /// Object to start from; defaults to the repository root
    #[arg(long)]
    pub start: Option<String>,
    /// Concurrent workers, overriding the configuration
    #[arg(long)]
    pub workers: Option<usize>,
    /// Append-only progress file for resuming an interrupted run
    #[arg(long)]
    pub progress: Option<PathBuf>,
}

#[derive(Args)]
pub struct AclArgs {
    pub id: String,
}
