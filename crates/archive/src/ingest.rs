//! Conversion of enveloped legacy replays into stored canonical replays.

use std::io::Read;

use osn::OsnError;
use tracing::info;
use wits_core::replay::GameReplay;
use wits_core::{ConvertConfig, ErrorSeverity, WitsError};

use crate::repository::{ReplayRepository, RepositoryError};
use crate::summary::MatchSummary;

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Osn(#[from] OsnError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl WitsError for ArchiveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Osn(err) => err.severity(),
            Self::Repository(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Osn(err) => err.error_code(),
            Self::Repository(err) => err.error_code(),
        }
    }
}

/// The legacy-to-canonical pipeline with a fixed conversion policy.
#[derive(Clone, Debug, Default)]
pub struct Ingest {
    config: ConvertConfig,
}

impl Ingest {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Converts one enveloped replay.
    pub fn convert(&self, bytes: &[u8]) -> Result<GameReplay, ArchiveError> {
        let legacy = osn::parse_replay_with(bytes, &self.config)?;
        Ok(osn::encode_replay(&legacy, &self.config)?)
    }

    /// Converts the replay read from `reader` and stores it in `repo`.
    pub fn ingest<R>(&self, mut reader: impl Read, repo: &R) -> Result<MatchSummary, ArchiveError>
    where
        R: ReplayRepository + ?Sized,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(OsnError::from)?;
        let replay = self.convert(&bytes)?;
        repo.save(&replay)?;
        let summary = MatchSummary::of(&replay);
        info!(match_id = %summary.match_id, turns = summary.turn_count, "archived replay");
        Ok(summary)
    }
}
