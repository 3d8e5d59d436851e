use std::fs;
use std::path::{Path, PathBuf};

use wits_core::replay::GameReplay;

use super::{read_json, write_json};
use crate::repository::error::check_key;
use crate::repository::{ReplayRepository, Result};
use crate::summary::MatchSummary;

/// Stores each replay as `<base_dir>/<match_id>.json`.
pub struct FileReplayRepository {
    base_dir: PathBuf,
}

impl FileReplayRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn replay_path(&self, match_id: &str) -> Result<PathBuf> {
        Ok(self.base_dir.join(format!("{}.json", check_key(match_id)?)))
    }

    fn match_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(id) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(".json"))
            {
                ids.push(id.to_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl ReplayRepository for FileReplayRepository {
    fn save(&self, replay: &GameReplay) -> Result<()> {
        let path = self.replay_path(&replay.game_id)?;
        write_json(&path, replay)?;
        tracing::debug!("Saved replay: {}", path.display());
        Ok(())
    }

    fn load(&self, match_id: &str) -> Result<Option<GameReplay>> {
        read_json(&self.replay_path(match_id)?)
    }

    fn exists(&self, match_id: &str) -> bool {
        self.replay_path(match_id)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    fn delete(&self, match_id: &str) -> Result<()> {
        let path = self.replay_path(match_id)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::info!("Deleted replay: {}", path.display());
        }
        Ok(())
    }

    fn summaries(&self) -> Result<Vec<MatchSummary>> {
        let mut summaries = Vec::new();
        for id in self.match_ids()? {
            if let Some(replay) = self.load(&id)? {
                summaries.push(MatchSummary::of(&replay));
            }
        }
        Ok(summaries)
    }
}
