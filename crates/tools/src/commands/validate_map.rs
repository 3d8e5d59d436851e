//! Validate map files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use archive::batch;
use clap::Parser;
use console::style;
use wits_content::MapLoader;

/// Validate a map file, or every `*.json` file under a directory
#[derive(Parser)]
pub struct ValidateMap {
    /// Map file or directory of map files
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Stop at the first invalid map
    #[arg(long)]
    fail_fast: bool,
}

impl ValidateMap {
    pub fn execute(self) -> Result<()> {
        let files = batch::json_files(&self.path)
            .with_context(|| format!("Failed to list maps under {}", self.path.display()))?;

        let report = batch::run(&files, self.fail_fast, |path| {
            let result = MapLoader::load(path);
            match &result {
                Ok(map) => println!(
                    "{} {} ({}, {} tiles)",
                    style("ok").green().bold(),
                    path.display(),
                    map.map_id,
                    map.terrain.len()
                ),
                Err(err) => println!("{} {}: {err:#}", style("invalid").red().bold(), path.display()),
            }
            result
        });

        println!();
        println!("{} {report}", style("Maps:").bold().cyan());
        Ok(())
    }
}
