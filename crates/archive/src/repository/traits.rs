//! Repository contracts for archived matches and maps.

use wits_core::MapDefinition;
use wits_core::replay::GameReplay;

use super::error::Result;
use crate::summary::MatchSummary;

/// Storage of converted replays, keyed by the short match id.
pub trait ReplayRepository: Send + Sync {
    /// Saves a replay, replacing any earlier record with the same id.
    fn save(&self, replay: &GameReplay) -> Result<()>;

    fn load(&self, match_id: &str) -> Result<Option<GameReplay>>;

    fn exists(&self, match_id: &str) -> bool;

    fn delete(&self, match_id: &str) -> Result<()>;

    /// Summaries of every stored match, ordered by match id.
    fn summaries(&self) -> Result<Vec<MatchSummary>>;

    /// Summaries matching `predicate`, ordered by match id.
    fn query(&self, predicate: &dyn Fn(&MatchSummary) -> bool) -> Result<Vec<MatchSummary>> {
        Ok(self
            .summaries()?
            .into_iter()
            .filter(|summary| predicate(summary))
            .collect())
    }
}

/// Storage of validated map definitions, keyed by map id.
pub trait MapRepository: Send + Sync {
    /// Validates and saves a map, returning its id.
    fn save(&self, map: &MapDefinition) -> Result<String>;

    fn load(&self, map_id: &str) -> Result<Option<MapDefinition>>;

    /// Ids of every stored map, sorted.
    fn list(&self) -> Result<Vec<String>>;
}
