//! Board state snapshots as written by the legacy game.

use serde::{Deserialize, Serialize};
use wits_core::{
    AlternateForm, CapturedTile, Checkpoint, HexCoord, Possession, UnitRace, UnitState,
};

use crate::boolish::Boolish;
use crate::enums::{LegacyClass, PlayerColor, PlayerIndex};
use crate::error::OsnError;

/// Legacy object form of a coordinate, `{"positionI": .., "positionJ": ..}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegacyCoord {
    #[serde(rename = "positionI")]
    pub column: i32,
    #[serde(rename = "positionJ")]
    pub row: i32,
}

impl From<LegacyCoord> for HexCoord {
    fn from(coord: LegacyCoord) -> Self {
        HexCoord::new(coord.column, coord.row)
    }
}

/// Sentinel used by the legacy format for "no unit".
const NO_UNIT: i32 = -1;

fn no_unit() -> i32 {
    NO_UNIT
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStatus {
    pub identifier: i32,
    pub owner: PlayerIndex,
    #[serde(default)]
    pub team: i32,
    #[serde(default)]
    pub color: Option<PlayerColor>,
    pub class: LegacyClass,
    pub race: UnitRace,
    #[serde(rename = "positionI")]
    pub column: i32,
    #[serde(rename = "positionJ")]
    pub row: i32,
    #[serde(default, rename = "hasAttacked")]
    pub attacked: Boolish,
    #[serde(default, rename = "hasMoved")]
    pub moved: Boolish,
    #[serde(default, rename = "hasTransformed")]
    pub transformed: Boolish,
    pub health: i32,
    #[serde(default, rename = "isAlt")]
    pub alt: Boolish,
    #[serde(default, rename = "altHealth")]
    pub alt_health: i32,
    #[serde(default = "no_unit")]
    pub parent: i32,
    #[serde(default = "no_unit", rename = "spawnedFrom")]
    pub spawned_from: i32,
}

impl UnitStatus {
    pub const fn position(&self) -> HexCoord {
        HexCoord::new(self.column, self.row)
    }

    pub fn parent(&self) -> Option<i32> {
        (self.parent != NO_UNIT).then_some(self.parent)
    }

    pub fn spawned_from(&self) -> Option<i32> {
        (self.spawned_from != NO_UNIT).then_some(self.spawned_from)
    }

    pub fn to_wits(&self) -> UnitState {
        UnitState {
            identifier: self.identifier,
            owner: self.owner.as_u8(),
            position: self.position(),
            team: self.owner.team(),
            race: self.race,
            class: self.class.as_wits(),
            health: self.health,
            has_attacked: self.attacked.into(),
            has_moved: self.moved.into(),
            has_transformed: self.transformed.into(),
            alternate: (self.alt.0 || self.alt_health > 0).then_some(AlternateForm {
                enabled: self.alt.0,
                health: self.alt_health,
            }),
            possessed: Possession::new(self.parent(), self.spawned_from()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedSpawn {
    pub ix: i32,
    pub iy: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureTileState {
    #[serde(rename = "tileI")]
    pub column: i32,
    #[serde(rename = "tileJ")]
    pub row: i32,
    #[serde(rename = "tileType")]
    pub tile_type: i32,
}

/// A checkpoint: the full board at a turn boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default, rename = "turnCount")]
    pub turn_count: u32,
    pub units: Vec<UnitStatus>,
    #[serde(default)]
    pub used_spawns: Vec<UsedSpawn>,
    #[serde(rename = "captureTileStates")]
    pub captured: Vec<CaptureTileState>,
    #[serde(rename = "currentPawnID")]
    pub current_pawn: i32,
    #[serde(rename = "currentPlayer")]
    pub current_player: PlayerIndex,
    #[serde(rename = "hp_base0")]
    pub base0_hp: i32,
    #[serde(rename = "hp_base1")]
    pub base1_hp: i32,
    /// 0 in progress, 1 destruction, 2 extinction, 3 forfeit.
    #[serde(default)]
    pub outcome: i64,
}

impl GameState {
    pub fn unit(&self, identifier: i32) -> Option<&UnitStatus> {
        self.units.iter().find(|unit| unit.identifier == identifier)
    }

    /// Both base health values. With a `max`, each must lie within
    /// `0..=max`; without one they are returned as recorded.
    pub fn base_health(&self, max: Option<u8>) -> Result<[i32; 2], OsnError> {
        let health = [self.base0_hp, self.base1_hp];
        let Some(max) = max else {
            return Ok(health);
        };
        match health.into_iter().find(|hp| !(0..=i32::from(max)).contains(hp)) {
            Some(health) => Err(OsnError::InvalidBaseHealth {
                turn: self.turn_count,
                health,
                max,
            }),
            None => Ok(health),
        }
    }

    /// Canonical form of this snapshot.
    pub fn checkpoint(&self, max_base_health: Option<u8>) -> Result<Checkpoint, OsnError> {
        let [base0_hp, base1_hp] = self.base_health(max_base_health)?;
        Ok(Checkpoint {
            base0_hp,
            base1_hp,
            used_spawns: self
                .used_spawns
                .iter()
                .map(|spawn| HexCoord::new(spawn.ix, spawn.iy))
                .collect(),
            captured: self
                .captured
                .iter()
                .map(|tile| CapturedTile {
                    position: HexCoord::new(tile.column, tile.row),
                    tile: tile.tile_type,
                })
                .collect(),
            units: self.units.iter().map(UnitStatus::to_wits).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wits_core::{Team, UnitClass};

    const STATE: &str = r#"{
        "turnCount": 4,
        "units": [
            {"identifier": 0, "owner": 0, "team": 0, "color": 2, "class": 5, "race": 1,
             "positionI": 4, "positionJ": 4, "hasAttacked": 1, "hasMoved": false,
             "hasTransformed": 0, "health": 5, "isAlt": 0, "altHealth": 0,
             "parent": -1, "spawnedFrom": -1},
            {"identifier": 1, "owner": 1, "team": 1, "color": 1, "class": 9, "race": "VEGGIENAUTS",
             "positionI": 8, "positionJ": 4, "health": 3, "isAlt": true, "altHealth": 2,
             "parent": -1, "spawnedFrom": 0}
        ],
        "used_spawns": [{"ix": 2, "iy": 7}],
        "captureTileStates": [{"tileI": 3, "tileJ": 4, "tileType": 2}],
        "currentPawnID": -1,
        "currentPlayer": 1,
        "hp_base0": 5,
        "hp_base1": 3
    }"#;

    #[test]
    fn decodes_a_checkpoint() {
        let state: GameState = serde_json::from_str(STATE).unwrap();
        assert_eq!(state.turn_count, 4);
        assert_eq!(state.units.len(), 2);
        assert_eq!(state.current_player, PlayerIndex::Player2);
        assert_eq!(state.outcome, 0);
        let heavy = state.unit(0).unwrap();
        assert!(bool::from(heavy.attacked));
        assert_eq!(heavy.parent(), None);
        assert_eq!(state.unit(1).unwrap().spawned_from(), Some(0));
    }

    #[test]
    fn checkpoint_is_canonical() {
        let state: GameState = serde_json::from_str(STATE).unwrap();
        let checkpoint = state.checkpoint(None).unwrap();
        assert_eq!((checkpoint.base0_hp, checkpoint.base1_hp), (5, 3));
        assert_eq!(checkpoint.used_spawns, vec![HexCoord::new(2, 7)]);
        assert_eq!(checkpoint.captured[0].tile, 2);

        let bramble = &checkpoint.units[1];
        assert_eq!(bramble.team, Team::Blue);
        assert_eq!(bramble.class, UnitClass::Special);
        assert_eq!(bramble.race, UnitRace::Veggienauts);
        assert_eq!(
            bramble.alternate,
            Some(AlternateForm {
                enabled: true,
                health: 2
            })
        );
        assert_eq!(bramble.possessed, Some(Possession { parent: None, from: Some(0) }));
        assert_eq!(checkpoint.units[0].alternate, None);
        assert_eq!(checkpoint.units[0].possessed, None);
    }

    #[test]
    fn base_health_is_carried_through_without_a_limit() {
        let mut state: GameState = serde_json::from_str(STATE).unwrap();
        state.base0_hp = 6;
        state.base1_hp = -1;
        assert_eq!(state.base_health(None).unwrap(), [6, -1]);
        let checkpoint = state.checkpoint(None).unwrap();
        assert_eq!((checkpoint.base0_hp, checkpoint.base1_hp), (6, -1));
    }

    #[test]
    fn base_health_limit_is_enforced_when_set() {
        let mut state: GameState = serde_json::from_str(STATE).unwrap();
        state.base1_hp = 9;
        assert!(matches!(
            state.checkpoint(Some(5)),
            Err(OsnError::InvalidBaseHealth { health: 9, max: 5, turn: 4 })
        ));
        state.base1_hp = -1;
        assert!(state.base_health(Some(5)).is_err());
        state.base1_hp = 5;
        assert_eq!(state.base_health(Some(5)).unwrap(), [5, 5]);
    }

    #[test]
    fn missing_required_field_fails() {
        let broken = STATE.replace(r#""hp_base0": 5,"#, "");
        assert!(serde_json::from_str::<GameState>(&broken).is_err());
    }
}
