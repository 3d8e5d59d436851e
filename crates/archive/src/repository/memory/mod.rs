//! In-memory repository implementations for testing and development.

mod map;
mod replay;

pub use map::InMemoryMapRepository;
pub use replay::InMemoryReplayRepository;
