//! Operator tools for the match archive.
//!
//! `wits validate-map` checks map files, `wits convert` turns archived
//! legacy replays into canonical ones and `wits read-replay` inspects a
//! single archived replay.

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Convert, ReadReplay, ValidateMap};

/// Tools for the wits match archive
#[derive(Parser)]
#[command(name = "wits")]
#[command(about = "Convert and validate archived wits matches", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose tracing
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Validate a map file or every map file under a directory
    ValidateMap(ValidateMap),

    /// Convert enveloped legacy replays into canonical replays
    Convert(Convert),

    /// Inspect an enveloped legacy replay
    ReadReplay(ReadReplay),
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Load .env file if it exists (for WITS_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Command::ValidateMap(cmd) => cmd.execute(),
        Command::Convert(cmd) => cmd.execute(),
        Command::ReadReplay(cmd) => cmd.execute(),
    }
}
