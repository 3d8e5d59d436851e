//! Legacy action vocabulary.
//!
//! Each action frame carries its fields under an `action` key together with
//! a `name` discriminator. The dispatch table below maps every known name to
//! the shape it is decoded with; anything else is rejected.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use wits_core::{ActionDict, CodecError, HexCoord, encode_coord};

use crate::enums::{LegacyClass, PlayerColor};
use crate::error::OsnError;
use crate::state::LegacyCoord;

/// Index of a unit (`pawnID`) within the checkpoint it was taken from.
pub type UnitIndex = i32;

/// An action as recorded by the legacy game.
///
/// `target` is the `(desti, destj)` cell of the frame. Two variants never
/// come from the wire directly: [`OsnAction::Toggle`] and
/// [`OsnAction::Teleport`] are what reduction turns selector pairs into,
/// although both are also valid frame names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OsnAction {
    StartTurn,
    EndTurn,
    SelectUnit {
        index: UnitIndex,
    },
    MoveUnit {
        index: UnitIndex,
        target: HexCoord,
        from: Option<HexCoord>,
    },
    ActiveHeal {
        index: UnitIndex,
        target: HexCoord,
        caster: Option<HexCoord>,
    },
    SelectSpawnTile {
        position: HexCoord,
    },
    SpawnUnit {
        position: Option<HexCoord>,
        /// Set once paired with its spawn-tile selection.
        spawn: Option<HexCoord>,
        color: PlayerColor,
        class: LegacyClass,
    },
    RangeAttack {
        index: UnitIndex,
        target: HexCoord,
    },
    ScramblerSpell {
        index: UnitIndex,
        target: HexCoord,
    },
    SpawnThorn {
        index: UnitIndex,
        target: HexCoord,
    },
    RetractThorn {
        index: UnitIndex,
        target: HexCoord,
    },
    ToggleBombShellMode {
        index: UnitIndex,
        target: HexCoord,
    },
    RootBramble {
        index: UnitIndex,
        target: HexCoord,
    },
    Eat {
        index: UnitIndex,
        target: HexCoord,
    },
    Spit {
        index: UnitIndex,
        target: HexCoord,
    },
    Toggle {
        index: UnitIndex,
        position: HexCoord,
    },
    Teleport {
        index: Option<UnitIndex>,
        caster: Option<HexCoord>,
        from: HexCoord,
        to: HexCoord,
    },
}

// ============================================================================
// Wire Shapes
// ============================================================================

#[derive(Deserialize)]
struct Frame<T> {
    action: T,
}

#[derive(Deserialize)]
struct Unnamed {}

#[derive(Deserialize)]
struct Selected {
    #[serde(rename = "pawnID")]
    index: UnitIndex,
}

#[derive(Deserialize)]
struct Targeted {
    #[serde(rename = "pawnID")]
    index: UnitIndex,
    desti: i32,
    destj: i32,
}

impl Targeted {
    fn target(&self) -> HexCoord {
        HexCoord::new(self.desti, self.destj)
    }
}

#[derive(Deserialize)]
struct Moved {
    #[serde(rename = "pawnID")]
    index: UnitIndex,
    desti: i32,
    destj: i32,
    #[serde(default)]
    from: Option<LegacyCoord>,
}

#[derive(Deserialize)]
struct Healed {
    #[serde(rename = "pawnID")]
    index: UnitIndex,
    desti: i32,
    destj: i32,
    #[serde(default)]
    caster: Option<LegacyCoord>,
}

#[derive(Deserialize)]
struct SpawnTile {
    ix: i32,
    iy: i32,
}

#[derive(Deserialize)]
struct Spawned {
    #[serde(default)]
    position: Vec<i32>,
    color: PlayerColor,
    role: LegacyClass,
}

#[derive(Deserialize)]
struct Toggled {
    index: UnitIndex,
    position: HexCoord,
}

#[derive(Deserialize)]
struct Teleported {
    #[serde(default)]
    caster: Option<LegacyCoord>,
    from: LegacyCoord,
    to: LegacyCoord,
}

fn coerce<T: DeserializeOwned>(name: &str, payload: &str) -> Result<T, OsnError> {
    serde_json::from_str::<Frame<T>>(payload)
        .map(|frame| frame.action)
        .map_err(|source| OsnError::MalformedAction {
            name: name.to_owned(),
            source,
        })
}

fn targeted(
    name: &str,
    payload: &str,
    build: fn(UnitIndex, HexCoord) -> OsnAction,
) -> Result<OsnAction, OsnError> {
    let action: Targeted = coerce(name, payload)?;
    Ok(build(action.index, action.target()))
}

/// Decodes the frame `payload` as the action named `name`.
pub fn decode_action(name: &str, payload: &str) -> Result<OsnAction, OsnError> {
    let action = match name {
        "StartTurnAction" => {
            coerce::<Unnamed>(name, payload)?;
            OsnAction::StartTurn
        }
        "EndTurnAction" => {
            coerce::<Unnamed>(name, payload)?;
            OsnAction::EndTurn
        }
        "SelectUnitAction" => {
            let action: Selected = coerce(name, payload)?;
            OsnAction::SelectUnit {
                index: action.index,
            }
        }
        "MoveUnitAction" => {
            let action: Moved = coerce(name, payload)?;
            OsnAction::MoveUnit {
                index: action.index,
                target: HexCoord::new(action.desti, action.destj),
                from: action.from.map(HexCoord::from),
            }
        }
        "ActiveHealAction" => {
            let action: Healed = coerce(name, payload)?;
            OsnAction::ActiveHeal {
                index: action.index,
                target: HexCoord::new(action.desti, action.destj),
                caster: action.caster.map(HexCoord::from),
            }
        }
        "SelectSpawnTileAction" => {
            let action: SpawnTile = coerce(name, payload)?;
            OsnAction::SelectSpawnTile {
                position: HexCoord::new(action.ix, action.iy),
            }
        }
        "SpawnUnitAction" => {
            let action: Spawned = coerce(name, payload)?;
            let position = match action.position[..] {
                [] => None,
                [i, j] => Some(HexCoord::new(i, j)),
                _ => return Err(CodecError::coordinate_len(action.position.len()).into()),
            };
            OsnAction::SpawnUnit {
                position,
                spawn: None,
                color: action.color,
                class: action.role,
            }
        }
        "RangeAttackAction" => targeted(name, payload, |index, target| OsnAction::RangeAttack {
            index,
            target,
        })?,
        "ScramblerSpellAction" => {
            targeted(name, payload, |index, target| OsnAction::ScramblerSpell {
                index,
                target,
            })?
        }
        "SpawnThornAction" => targeted(name, payload, |index, target| OsnAction::SpawnThorn {
            index,
            target,
        })?,
        "RetractThornAction" => {
            targeted(name, payload, |index, target| OsnAction::RetractThorn {
                index,
                target,
            })?
        }
        "ToggleBombShellModeAction" | "ToggleArtilleryModeAction" => {
            targeted(name, payload, |index, target| OsnAction::ToggleBombShellMode {
                index,
                target,
            })?
        }
        "RootBrambleAction" => targeted(name, payload, |index, target| OsnAction::RootBramble {
            index,
            target,
        })?,
        "EatAction" => targeted(name, payload, |index, target| OsnAction::Eat { index, target })?,
        "SpitAction" => {
            targeted(name, payload, |index, target| OsnAction::Spit { index, target })?
        }
        "ToggleAction" => {
            let action: Toggled = coerce(name, payload)?;
            OsnAction::Toggle {
                index: action.index,
                position: action.position,
            }
        }
        "TeleportAction" => {
            let action: Teleported = coerce(name, payload)?;
            OsnAction::Teleport {
                index: None,
                caster: action.caster.map(HexCoord::from),
                from: action.from.into(),
                to: action.to.into(),
            }
        }
        _ => {
            return Err(OsnError::UnrecognizedAction {
                name: name.to_owned(),
            });
        }
    };
    Ok(action)
}

impl OsnAction {
    /// Legacy type name, as found in the `name` field of a frame.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StartTurn => "StartTurnAction",
            Self::EndTurn => "EndTurnAction",
            Self::SelectUnit { .. } => "SelectUnitAction",
            Self::MoveUnit { .. } => "MoveUnitAction",
            Self::ActiveHeal { .. } => "ActiveHealAction",
            Self::SelectSpawnTile { .. } => "SelectSpawnTileAction",
            Self::SpawnUnit { .. } => "SpawnUnitAction",
            Self::RangeAttack { .. } => "RangeAttackAction",
            Self::ScramblerSpell { .. } => "ScramblerSpellAction",
            Self::SpawnThorn { .. } => "SpawnThornAction",
            Self::RetractThorn { .. } => "RetractThornAction",
            Self::ToggleBombShellMode { .. } => "ToggleBombShellModeAction",
            Self::RootBramble { .. } => "RootBrambleAction",
            Self::Eat { .. } => "EatAction",
            Self::Spit { .. } => "SpitAction",
            Self::Toggle { .. } => "ToggleAction",
            Self::Teleport { .. } => "TeleportAction",
        }
    }

    /// Turn markers and selections carry no effect of their own.
    pub const fn is_scaffolding(&self) -> bool {
        matches!(
            self,
            Self::StartTurn
                | Self::EndTurn
                | Self::SelectUnit { .. }
                | Self::SelectSpawnTile { .. }
                | Self::Eat { .. }
        )
    }

    /// Index of the acting unit, when the action names one.
    pub const fn unit_index(&self) -> Option<UnitIndex> {
        match *self {
            Self::SelectUnit { index }
            | Self::MoveUnit { index, .. }
            | Self::ActiveHeal { index, .. }
            | Self::RangeAttack { index, .. }
            | Self::ScramblerSpell { index, .. }
            | Self::SpawnThorn { index, .. }
            | Self::RetractThorn { index, .. }
            | Self::ToggleBombShellMode { index, .. }
            | Self::RootBramble { index, .. }
            | Self::Eat { index, .. }
            | Self::Spit { index, .. }
            | Self::Toggle { index, .. } => Some(index),
            Self::Teleport { index, .. } => index,
            Self::StartTurn | Self::EndTurn | Self::SelectSpawnTile { .. } | Self::SpawnUnit { .. } => {
                None
            }
        }
    }

    /// Dictionary form written to converted replays: `name`, the unit
    /// `index` and the cells involved as coordinate arrays.
    pub fn as_dict(&self) -> ActionDict {
        let mut dict = Map::new();
        dict.insert("name".into(), json!(self.name()));
        let mut put = |key: &str, value: Value| {
            dict.insert(key.into(), value);
        };
        match *self {
            Self::StartTurn | Self::EndTurn => {}
            Self::SelectUnit { index } => put("index", json!(index)),
            Self::MoveUnit { index, target, from } => {
                put("index", json!(index));
                if let Some(from) = from {
                    put("from", encode_coord(from));
                }
                put("to", encode_coord(target));
            }
            Self::ActiveHeal {
                index,
                target,
                caster,
            } => {
                put("index", json!(index));
                put("target", encode_coord(target));
                if let Some(caster) = caster {
                    put("caster", encode_coord(caster));
                }
            }
            Self::SelectSpawnTile { position } => put("position", encode_coord(position)),
            Self::SpawnUnit {
                position,
                spawn,
                color,
                class,
            } => {
                put("color", json!(color.to_string()));
                put("class", json!(class.to_string()));
                if let Some(position) = position {
                    put("position", encode_coord(position));
                }
                if let Some(spawn) = spawn {
                    put("spawn", encode_coord(spawn));
                }
            }
            Self::RangeAttack { index, target } => {
                put("index", json!(index));
                put("target", encode_coord(target));
            }
            Self::ScramblerSpell { index, target }
            | Self::SpawnThorn { index, target }
            | Self::RetractThorn { index, target }
            | Self::ToggleBombShellMode { index, target }
            | Self::RootBramble { index, target } => {
                put("index", json!(index));
                put("position", encode_coord(target));
            }
            Self::Eat { index, target } => {
                put("index", json!(index));
                put("from", encode_coord(target));
            }
            Self::Spit { index, target } => {
                put("index", json!(index));
                put("to", encode_coord(target));
            }
            Self::Toggle { index, position } => {
                put("index", json!(index));
                put("position", encode_coord(position));
            }
            Self::Teleport {
                index,
                caster,
                from,
                to,
            } => {
                if let Some(index) = index {
                    put("index", json!(index));
                }
                if let Some(caster) = caster {
                    put("caster", encode_coord(caster));
                }
                put("from", encode_coord(from));
                put("to", encode_coord(to));
            }
        }
        dict
    }
}
