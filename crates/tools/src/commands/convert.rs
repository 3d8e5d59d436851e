//! Convert enveloped legacy replays.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use archive::{FileReplayRepository, Ingest, ReplayRepository, batch};
use clap::Parser;
use console::style;
use wits_content::{ConfigLoader, ContentFactory};
use wits_core::ConvertConfig;

use crate::dirs;

/// Convert enveloped legacy replays into canonical replays
#[derive(Parser)]
pub struct Convert {
    /// Replay files or directories of replay files
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Write each converted replay to `<DIR>/<match id>.json`
    #[arg(short, long, value_name = "DIR", conflicts_with = "store")]
    out: Option<PathBuf>,

    /// Save converted replays in the archive data directory
    #[arg(long)]
    store: bool,

    /// Conversion settings (TOML); defaults to `<data dir>/convert.toml`
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Stop at the first replay that fails to convert
    #[arg(long)]
    fail_fast: bool,
}

enum Sink {
    Stdout,
    Directory(PathBuf),
    Archive(FileReplayRepository),
}

impl Convert {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data_dir.clone());
        let config = self.load_config(&data_dir)?;
        let sink = self.sink(&data_dir)?;

        let mut files = Vec::new();
        for path in &self.files {
            files.extend(
                batch::json_files(path)
                    .with_context(|| format!("Failed to list replays under {}", path.display()))?,
            );
        }

        let ingest = Ingest::new(config);
        let report = batch::run(&files, self.fail_fast, |path| {
            let result = convert_one(&ingest, &sink, path);
            if let Err(err) = &result {
                println!("{} {}: {err:#}", style("failed").red().bold(), path.display());
            }
            result
        });

        if !matches!(sink, Sink::Stdout) {
            println!();
            println!("{} {report}", style("Replays:").bold().cyan());
        }
        Ok(())
    }

    fn load_config(&self, data_dir: &Path) -> Result<ConvertConfig> {
        match &self.config {
            Some(path) => ConfigLoader::load(path),
            None => ContentFactory::new(data_dir).load_config(),
        }
    }

    fn sink(&self, data_dir: &Path) -> Result<Sink> {
        if let Some(dir) = &self.out {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
            return Ok(Sink::Directory(dir.clone()));
        }
        if self.store {
            let dir = dirs::replay_dir(data_dir);
            let repo = FileReplayRepository::new(&dir)
                .with_context(|| format!("Failed to open replay archive {}", dir.display()))?;
            return Ok(Sink::Archive(repo));
        }
        Ok(Sink::Stdout)
    }
}

fn convert_one(ingest: &Ingest, sink: &Sink, path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let replay = ingest.convert(&bytes)?;

    match sink {
        Sink::Stdout => println!("{}", serde_json::to_string(&replay)?),
        Sink::Directory(dir) => {
            let out = dir.join(format!("{}.json", replay.game_id));
            fs::write(&out, serde_json::to_string_pretty(&replay)?)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!(
                "{} {} -> {}",
                style("converted").green().bold(),
                path.display(),
                out.display()
            );
        }
        Sink::Archive(repo) => {
            repo.save(&replay)?;
            println!(
                "{} {} as {} ({} turns)",
                style("stored").green().bold(),
                path.display(),
                replay.game_id,
                replay.turn_count()
            );
        }
    }
    Ok(())
}
