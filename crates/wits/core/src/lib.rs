//! Canonical ("wits") data model for archived matches.
//!
//! `wits-core` defines the stable representation that legacy replays are
//! converted into: board coordinates, team/class/race enumerations, packed
//! terrain, map definitions with their exclusivity check, canonical actions
//! and the canonical replay document. Everything here is plain data with a
//! fixed JSON form; decoding is strict and reports a [`error::WitsError`]
//! instead of defaulting.
pub mod action;
pub mod codec;
pub mod config;
pub mod coord;
pub mod error;
pub mod map;
pub mod ranked;
pub mod replay;
pub mod status;
pub mod terrain;
pub mod unit;

pub use action::{PlayerAction, PlayerTurn};
pub use codec::EnumCodec;
pub use config::ConvertConfig;
pub use coord::{HexCoord, decode_coord, encode_coord};
pub use error::{CodecError, ErrorSeverity, WitsError};
pub use map::{
    GameMap, MapDefinition, MapError, MapInit, PackedTerrain, Reflection, Rotation,
    TerrainDefinition, TileDefinition, TileKind, UnitInit, validate_exclusivity,
};
pub use ranked::{LeagueRank, LeagueTier, Standings, StandingsAfter, UnknownTier};
pub use replay::{
    ActionDict, AlternateForm, CapturedTile, Checkpoint, GameReplay, Outcome, PlayerRole,
    Possession, TurnRecord, UnitPlacement, UnitState,
};
pub use status::TerminalStatus;
pub use terrain::{MapTerrain, TYPE_MASK, TerrainCategory};
pub use unit::{Team, UnitClass, UnitRace};
