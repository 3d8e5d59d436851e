//! Repository layer for archived matches and maps.
//!
//! Records are addressed by the short match id or the map id and stored
//! whole. Queries run over [`MatchSummary`](crate::summary::MatchSummary)
//! values.

pub(crate) mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileMapRepository, FileReplayRepository};
pub use memory::{InMemoryMapRepository, InMemoryReplayRepository};
pub use traits::{MapRepository, ReplayRepository};
