//! Read and inspect an enveloped legacy replay.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use wits_content::ConfigLoader;
use wits_core::replay::GameReplay as WitsReplay;

/// Read and inspect an enveloped legacy replay
#[derive(Parser)]
pub struct ReadReplay {
    /// Replay file as fetched from the archive service
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Conversion settings (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Limit number of turns to display (0 = unlimited)
    #[arg(short, long, default_value = "100")]
    limit: usize,

    /// Skip first N turns
    #[arg(long, default_value = "0")]
    skip: usize,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Match metadata, players and outcome
    Summary,
    /// Reduced action names per turn
    Turns,
    /// Canonical actions in s-expression form
    Relvar,
    /// Full canonical JSON
    Json,
}

impl ReadReplay {
    pub fn execute(self) -> Result<()> {
        let config = ConfigLoader::load_or_default(self.config.as_deref())?;
        let file = File::open(&self.file)
            .with_context(|| format!("Failed to open {}", self.file.display()))?;
        let legacy = osn::parse_replay_with(BufReader::new(file), &config)
            .with_context(|| format!("Failed to decode {}", self.file.display()))?;
        let converted = osn::encode_replay(&legacy, &config)?;

        let take = if self.limit == 0 { usize::MAX } else { self.limit };

        match self.format {
            OutputFormat::Summary => print_summary(&converted),
            OutputFormat::Turns => {
                for turn in converted.replay.iter().skip(self.skip).take(take) {
                    let names: Vec<_> = turn.action_names().collect();
                    println!(
                        "{} {}",
                        style(format!("turn {:>3}:", turn.turn)).bold().cyan(),
                        if names.is_empty() {
                            style("(no actions)".to_string()).dim().to_string()
                        } else {
                            names.join(", ")
                        }
                    );
                }
            }
            OutputFormat::Relvar => {
                for turn in osn::lift_turns(&legacy.turns)?.iter().skip(self.skip).take(take) {
                    println!(
                        "{} {}",
                        style(format!("turn {:>3} {}:", turn.turn, turn.team())).bold().cyan(),
                        turn.rel_var_encoding()
                    );
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&converted)?),
        }
        Ok(())
    }
}

fn print_summary(replay: &WitsReplay) {
    println!("{} {}", style("Match:").bold().cyan(), replay.game_id);
    println!(
        "{} {} ({})",
        style("Map:").bold().cyan(),
        replay.map_name,
        replay.map_theme
    );
    println!("{} {}", style("Result:").bold().cyan(), replay.outcome.result);
    println!(
        "{} {} turns, {} actions",
        style("Length:").bold().cyan(),
        replay.turn_count(),
        replay.action_count()
    );
    println!(
        "{} {} / {}",
        style("Bases:").bold().cyan(),
        replay.outcome.checkpoint.base0_hp,
        replay.outcome.checkpoint.base1_hp
    );
    println!();
    println!("{}", style("Players:").bold().cyan());
    for player in &replay.players {
        let result = player
            .result
            .map(|result| result.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<6} {:<20} {:<12} {:<12} {}",
            player.team.to_string(),
            player.name,
            player.gcid,
            player.race.to_string(),
            result
        );
    }
    for (before, after) in replay.outcome.before.iter().zip(&replay.outcome.after) {
        if before.gcid.is_empty() {
            continue;
        }
        println!(
            "  {:<12} {} #{} -> {} #{} ({:+})",
            before.gcid, before.tier, before.rank, after.tier, after.rank, after.delta
        );
    }
}
