//! Archive of converted matches.
//!
//! [`repository`] defines where converted replays and maps are kept,
//! [`ingest`] turns enveloped legacy replays into stored records and
//! [`batch`] runs either over whole directories.
pub mod batch;
pub mod ingest;
pub mod repository;
pub mod summary;

pub use batch::{BatchFailure, BatchReport, json_files};
pub use ingest::{ArchiveError, Ingest};
pub use repository::{
    FileMapRepository, FileReplayRepository, InMemoryMapRepository, InMemoryReplayRepository,
    MapRepository, ReplayRepository, RepositoryError,
};
pub use summary::{FetchStatus, MatchSummary};
