use std::str::FromStr;

use anyhow::Context;
use boxc_indexing::IndexerConfig;
use clap::Parser;

mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = match &cli.config {
        Some(path) => IndexerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => IndexerConfig::default(),
    };

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::from_str(&config.log_level)
            .with_context(|| format!("invalid log_level {:?}", config.log_level))?
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    commands::run_command(cli, config)
}
