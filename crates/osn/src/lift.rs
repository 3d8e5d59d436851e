//! Lifting reduced legacy actions into canonical player actions.
//!
//! Canonical actions name units by the cell they stand on. Positions start
//! from the turn's checkpoint and follow moves and teleports made earlier in
//! the same turn. Nothing else about the board is simulated.

use std::collections::HashMap;

use tracing::debug;
use wits_core::{HexCoord, PlayerAction, PlayerTurn as WitsTurn};

use crate::action::{OsnAction, UnitIndex};
use crate::error::OsnError;
use crate::reduce::reduce;
use crate::turns::PlayerTurn;

struct Positions {
    turn: u32,
    by_index: HashMap<UnitIndex, HexCoord>,
}

impl Positions {
    fn of(turn: &PlayerTurn) -> Self {
        Self {
            turn: turn.turn_count(),
            by_index: turn
                .state
                .units
                .iter()
                .map(|unit| (unit.identifier, unit.position()))
                .collect(),
        }
    }

    fn locate(&self, index: UnitIndex) -> Result<HexCoord, OsnError> {
        self.by_index
            .get(&index)
            .copied()
            .ok_or(OsnError::UnknownUnit {
                index,
                turn: self.turn,
            })
    }

    fn relocate(&mut self, from: HexCoord, to: HexCoord) {
        for position in self.by_index.values_mut().filter(|position| **position == from) {
            *position = to;
        }
    }
}

/// Lifts one turn. A turn without any canonical action becomes a pass.
pub fn lift_turn(turn: &PlayerTurn) -> Result<WitsTurn, OsnError> {
    let mut positions = Positions::of(turn);
    let mut lifted = WitsTurn::new(turn.turn_count());

    for action in reduce(&turn.actions)? {
        let canonical = match action {
            OsnAction::MoveUnit {
                index,
                target,
                from,
            } => {
                let from = match from {
                    Some(from) => from,
                    None => positions.locate(index)?,
                };
                positions.by_index.insert(index, target);
                PlayerAction::MoveUnit { from, to: target }
            }
            OsnAction::ActiveHeal {
                index,
                target,
                caster,
            } => PlayerAction::HealUnit {
                healer: match caster {
                    Some(caster) => caster,
                    None => positions.locate(index)?,
                },
                target,
            },
            OsnAction::SpawnUnit {
                spawn: Some(spawn),
                class,
                ..
            } => PlayerAction::SpawnUnit {
                spawn,
                class: class.as_wits(),
            },
            OsnAction::RangeAttack { index, target } => PlayerAction::Attack {
                agent: positions.locate(index)?,
                target,
            },
            OsnAction::ScramblerSpell { index, target } => PlayerAction::CharmUnit {
                agent: positions.locate(index)?,
                target,
            },
            OsnAction::Toggle { position, .. } => PlayerAction::ToggleAlt { position },
            OsnAction::Teleport {
                index,
                caster,
                from,
                to,
            } => {
                let mobi = match (caster, index) {
                    (Some(caster), _) => caster,
                    (None, Some(index)) => positions.locate(index)?,
                    (None, None) => {
                        debug!(turn = lifted.turn, "teleport without a caster has no canonical form");
                        continue;
                    }
                };
                positions.relocate(from, to);
                PlayerAction::Teleport { mobi, from, to }
            }
            other => {
                debug!(
                    turn = lifted.turn,
                    action = other.name(),
                    "no canonical form, skipping"
                );
                continue;
            }
        };
        lifted.actions.push(canonical);
    }

    if lifted.actions.is_empty() {
        lifted.actions.push(PlayerAction::Pass);
    }
    Ok(lifted)
}

/// Lifts every turn in order.
pub fn lift_turns(turns: &[PlayerTurn]) -> Result<Vec<WitsTurn>, OsnError> {
    turns.iter().map(lift_turn).collect()
}
