//! Canonical player actions.
//!
//! The canonical vocabulary is smaller than the legacy one: selections and
//! turn markers are gone, two-step actions (eat then spit) are single
//! actions, and every unit is referenced by the cell it stands on rather than
//! by an index.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::coord::HexCoord;
use crate::error::CodecError;
use crate::unit::{Team, UnitClass};

/// A single canonical action. The JSON form is `{"name": <tag>, ...fields}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum PlayerAction {
    /// Ends the turn keeping the remaining wits.
    Pass,
    MoveUnit {
        from: HexCoord,
        to: HexCoord,
    },
    HealUnit {
        healer: HexCoord,
        target: HexCoord,
    },
    SpawnUnit {
        spawn: HexCoord,
        class: UnitClass,
    },
    Attack {
        agent: HexCoord,
        target: HexCoord,
    },
    CharmUnit {
        agent: HexCoord,
        target: HexCoord,
    },
    /// Switches a special unit into or out of its alternate form.
    ToggleAlt {
        position: HexCoord,
    },
    Teleport {
        mobi: HexCoord,
        from: HexCoord,
        to: HexCoord,
    },
}

impl PlayerAction {
    pub const NAMES: [&'static str; 8] = [
        "Pass",
        "MoveUnit",
        "HealUnit",
        "SpawnUnit",
        "Attack",
        "CharmUnit",
        "ToggleAlt",
        "Teleport",
    ];

    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::MoveUnit { .. } => "MoveUnit",
            Self::HealUnit { .. } => "HealUnit",
            Self::SpawnUnit { .. } => "SpawnUnit",
            Self::Attack { .. } => "Attack",
            Self::CharmUnit { .. } => "CharmUnit",
            Self::ToggleAlt { .. } => "ToggleAlt",
            Self::Teleport { .. } => "Teleport",
        }
    }

    /// S-expression form used when diffing and debugging replays, e.g.
    /// `["move", ["ij", 1, 2], ["ij", 3, 4]]`.
    pub fn rel_var_encoding(&self) -> Value {
        match *self {
            Self::Pass => json!(["pass"]),
            Self::MoveUnit { from, to } => json!(["move", ij(from), ij(to)]),
            Self::HealUnit { healer, target } => json!(["heal", ij(healer), ij(target)]),
            Self::SpawnUnit { spawn, class } => json!(["spawn", ij(spawn), class.to_string()]),
            Self::Attack { agent, target } => json!(["attack", ij(agent), ij(target)]),
            Self::CharmUnit { agent, target } => json!(["charm", ij(agent), ij(target)]),
            Self::ToggleAlt { position } => json!(["toggle", ij(position)]),
            Self::Teleport { mobi, from, to } => {
                json!(["teleport", ij(mobi), ij(from), ij(to)])
            }
        }
    }

    /// Decodes the JSON form, telling an unknown name apart from bad fields.
    pub fn decode(value: &Value) -> Result<Self, CodecError> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| CodecError::UnknownAction(String::new()))?;
        if !Self::NAMES.contains(&name) {
            return Err(CodecError::UnknownAction(name.to_owned()));
        }
        Self::deserialize(value).map_err(|err| CodecError::MalformedAction {
            name: name.to_owned(),
            reason: err.to_string(),
        })
    }
}

fn ij(coord: HexCoord) -> Value {
    json!(["ij", coord.i, coord.j])
}

/// One player's actions for a turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTurn {
    pub turn: u32,
    pub actions: Vec<PlayerAction>,
}

impl PlayerTurn {
    pub fn new(turn: u32) -> Self {
        Self {
            turn,
            actions: Vec::new(),
        }
    }

    /// Turns alternate starting with the recording player on turn 1.
    pub const fn team(&self) -> Team {
        if self.turn % 2 == 1 {
            Team::Red
        } else {
            Team::Blue
        }
    }

    pub fn rel_var_encoding(&self) -> Value {
        Value::Array(self.actions.iter().map(PlayerAction::rel_var_encoding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(i: i32, j: i32) -> HexCoord {
        HexCoord::new(i, j)
    }

    #[test]
    fn json_form_is_name_tagged() {
        let action = PlayerAction::MoveUnit {
            from: coord(1, 2),
            to: coord(3, 4),
        };
        let encoded = serde_json::to_value(action).unwrap();
        assert_eq!(encoded, json!({"name": "MoveUnit", "from": [1, 2], "to": [3, 4]}));
        assert_eq!(PlayerAction::decode(&encoded), Ok(action));

        let spawn = json!({"name": "SpawnUnit", "spawn": {"i": 2, "j": 7}, "class": 2});
        assert_eq!(
            PlayerAction::decode(&spawn),
            Ok(PlayerAction::SpawnUnit {
                spawn: coord(2, 7),
                class: UnitClass::Soldier,
            })
        );
        assert_eq!(
            PlayerAction::decode(&json!({"name": "Pass"})),
            Ok(PlayerAction::Pass)
        );
    }

    #[test]
    fn unknown_and_malformed_actions() {
        assert_eq!(
            PlayerAction::decode(&json!({"name": "Dance"})),
            Err(CodecError::UnknownAction("Dance".into()))
        );
        assert!(matches!(
            PlayerAction::decode(&json!({"name": "Attack", "agent": [1, 1]})),
            Err(CodecError::MalformedAction { ref name, .. }) if name == "Attack"
        ));
    }

    #[test]
    fn rel_var_encoding() {
        let action = PlayerAction::MoveUnit {
            from: coord(1, 2),
            to: coord(3, 4),
        };
        assert_eq!(
            action.rel_var_encoding().to_string(),
            r#"["move",["ij",1,2],["ij",3,4]]"#
        );
        assert_eq!(PlayerAction::Pass.rel_var_encoding(), json!(["pass"]));
        let teleport = PlayerAction::Teleport {
            mobi: coord(5, 5),
            from: coord(5, 6),
            to: coord(9, 2),
        };
        assert_eq!(teleport.action_name(), "Teleport");
        assert_eq!(
            teleport.rel_var_encoding(),
            json!(["teleport", ["ij", 5, 5], ["ij", 5, 6], ["ij", 9, 2]])
        );
    }

    #[test]
    fn turns_alternate_teams() {
        assert_eq!(PlayerTurn::new(1).team(), Team::Red);
        assert_eq!(PlayerTurn::new(2).team(), Team::Blue);
        assert_eq!(PlayerTurn::new(7).team(), Team::Red);
    }
}
