use std::collections::BTreeMap;
use std::sync::RwLock;

use wits_core::replay::GameReplay;

use crate::repository::error::check_key;
use crate::repository::{ReplayRepository, RepositoryError, Result};
use crate::summary::MatchSummary;

/// In-memory replay repository.
///
/// Thread-safe but not persistent across process restarts.
#[derive(Default)]
pub struct InMemoryReplayRepository {
    replays: RwLock<BTreeMap<String, GameReplay>>,
}

impl InMemoryReplayRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplayRepository for InMemoryReplayRepository {
    fn save(&self, replay: &GameReplay) -> Result<()> {
        let key = check_key(&replay.game_id)?.to_owned();
        let mut replays = self
            .replays
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        replays.insert(key, replay.clone());
        Ok(())
    }

    fn load(&self, match_id: &str) -> Result<Option<GameReplay>> {
        let replays = self
            .replays
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(replays.get(match_id).cloned())
    }

    fn exists(&self, match_id: &str) -> bool {
        self.replays
            .read()
            .map(|replays| replays.contains_key(match_id))
            .unwrap_or(false)
    }

    fn delete(&self, match_id: &str) -> Result<()> {
        let mut replays = self
            .replays
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        replays.remove(match_id);
        Ok(())
    }

    fn summaries(&self) -> Result<Vec<MatchSummary>> {
        let replays = self
            .replays
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(replays.values().map(MatchSummary::of).collect())
    }
}
