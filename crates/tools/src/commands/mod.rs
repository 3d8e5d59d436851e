//! Command implementations for the `wits` binary.
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod convert;
mod read_replay;
mod validate_map;

pub use convert::Convert;
pub use read_replay::ReadReplay;
pub use validate_map::ValidateMap;
