use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use hikeflora::cli::{Cli, Commands};
use hikeflora::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::builder().with_default_directive(level.into()).from_env_lossy())
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Plants(args) => commands::plants(&cli, args),
        Commands::Trails(args) => commands::trails(&cli, args),
    }
}
