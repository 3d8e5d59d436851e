//! Canonical replay document.
//!
//! This is the output of the legacy converter and the unit of storage in the
//! archive. Field names are snake_case except for the player key `gcID` and
//! the per-unit status flags, which keep their legacy spelling so that
//! existing consumers of converted replays keep working.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coord::HexCoord;
use crate::ranked::{Standings, StandingsAfter};
use crate::status::TerminalStatus;
use crate::unit::{Team, UnitClass, UnitRace};

/// A reduced action as emitted by the converter: a `name` plus the fields
/// of that action.
pub type ActionDict = Map<String, Value>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReplay {
    /// Short match id (common archive prefix removed).
    pub game_id: String,
    pub map_name: String,
    pub map_theme: String,
    pub players: Vec<PlayerRole>,
    /// Units on the board when the first turn starts.
    pub units: Vec<UnitPlacement>,
    pub outcome: Outcome,
    pub replay: Vec<TurnRecord>,
}

impl GameReplay {
    pub fn turn_count(&self) -> usize {
        self.replay.len()
    }

    pub fn action_count(&self) -> usize {
        self.replay.iter().map(|turn| turn.actions.len()).sum()
    }

    pub fn player(&self, team: Team) -> Option<&PlayerRole> {
        self.players.iter().find(|player| player.team == team)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRole {
    pub name: String,
    #[serde(rename = "gcID")]
    pub gcid: String,
    pub race: UnitRace,
    pub team: Team,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TerminalStatus>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPlacement {
    pub position: HexCoord,
    pub team: Team,
    pub class: UnitClass,
}

/// Final result, league movement and the last known board state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub result: TerminalStatus,
    /// `[winner, loser]`, followed by any further players of a duos match.
    pub before: Vec<Standings>,
    pub after: Vec<StandingsAfter>,
    #[serde(flatten)]
    pub checkpoint: Checkpoint,
}

/// Board state at a turn boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub base0_hp: i32,
    pub base1_hp: i32,
    pub used_spawns: Vec<HexCoord>,
    pub captured: Vec<CapturedTile>,
    pub units: Vec<UnitState>,
}

impl Checkpoint {
    pub fn unit(&self, identifier: i32) -> Option<&UnitState> {
        self.units.iter().find(|unit| unit.identifier == identifier)
    }

    pub fn unit_at(&self, position: HexCoord) -> Option<&UnitState> {
        self.units.iter().find(|unit| unit.position == position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedTile {
    pub position: HexCoord,
    pub tile: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitState {
    pub identifier: i32,
    /// Player index (0..=3) of the controlling player.
    pub owner: u8,
    pub position: HexCoord,
    pub team: Team,
    pub race: UnitRace,
    pub class: UnitClass,
    pub health: i32,
    #[serde(rename = "hasAttacked")]
    pub has_attacked: bool,
    #[serde(rename = "hasMoved")]
    pub has_moved: bool,
    #[serde(rename = "hasTransformed")]
    pub has_transformed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate: Option<AlternateForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possessed: Option<Possession>,
}

/// Toggle state of a special unit with an alternate form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateForm {
    pub enabled: bool,
    pub health: i32,
}

/// Parentage of a unit that was spawned or charmed by another one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Possession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<i32>,
}

impl Possession {
    /// `None` when the unit has neither a parent nor a spawn source.
    pub fn new(parent: Option<i32>, from: Option<i32>) -> Option<Self> {
        (parent.is_some() || from.is_some()).then_some(Self { parent, from })
    }
}

/// One turn of the converted replay. `checkpoint` is the state at the start
/// of the turn, before any of `actions` were applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub actions: Vec<ActionDict>,
    pub checkpoint: Checkpoint,
}

impl TurnRecord {
    pub fn action_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.actions
            .iter()
            .filter_map(|action| action.get("name").and_then(Value::as_str))
    }
}
