use serde::{Deserialize, Serialize};

use crate::coord::HexCoord;
use crate::map::{MapError, TerrainDefinition, validate_exclusivity};
use crate::unit::{Team, UnitClass};

/// A unit standing on the map before the first turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitInit {
    pub coord: HexCoord,
    pub team: Team,
    pub class: UnitClass,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapInit {
    #[serde(default)]
    pub units: Vec<UnitInit>,
}

/// Rotational symmetry of an authored map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    pub position: HexCoord,
    #[serde(default)]
    pub center: bool,
}

/// Mirror symmetry of an authored map. `flip` is `HORIZONTAL` or `VERTICAL`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub axis: i32,
    pub flip: String,
    #[serde(default)]
    pub center: bool,
}

/// A map file: terrain, starting units and symmetry metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDefinition {
    pub map_id: String,
    pub name: String,
    pub terrain: TerrainDefinition,
    #[serde(default)]
    pub init: MapInit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<Rotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror: Option<Reflection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<bool>,
}

impl MapDefinition {
    /// Maps imported from the legacy archive keep their original layout.
    pub fn is_legacy(&self) -> bool {
        self.legacy.unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), MapError> {
        validate_exclusivity(&self.terrain)
    }

    /// Teams that own at least one base, in team order.
    pub fn teams(&self) -> Vec<Team> {
        let mut teams: Vec<Team> = self
            .terrain
            .base()
            .filter_map(|tile| tile.kind.team())
            .collect();
        teams.sort();
        teams.dedup();
        teams
    }
}

/// A map reference as stored with a match: either just its id or the full
/// definition once it has been loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameMap {
    Id(String),
    Loaded(Box<MapDefinition>),
}

impl GameMap {
    pub fn map_id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Loaded(definition) => &definition.map_id,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn definition(&self) -> Option<&MapDefinition> {
        match self {
            Self::Id(_) => None,
            Self::Loaded(definition) => Some(definition),
        }
    }
}

impl From<MapDefinition> for GameMap {
    fn from(definition: MapDefinition) -> Self {
        Self::Loaded(Box::new(definition))
    }
}
