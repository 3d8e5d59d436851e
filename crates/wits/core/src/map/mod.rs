//! Map definitions.
//!
//! A map is authored as five tile lists (floor, wall, bonus, spawn, base)
//! plus initial unit placements. [`TerrainDefinition`] holds the tiles,
//! [`validate_exclusivity`] checks that no two of them share a cell, and
//! [`MapDefinition`] adds the metadata found in map files.

mod definition;
mod error;
mod terrain;
mod validate;

pub use definition::{GameMap, MapDefinition, MapInit, Reflection, Rotation, UnitInit};
pub use error::MapError;
pub use terrain::{PackedTerrain, TerrainDefinition, TileDefinition, TileKind};
pub use validate::validate_exclusivity;
