//! Collapses legacy action sequences into the converted action list.
//!
//! Selections, turn markers and eats are dropped. A spawn absorbs the spawn
//! tile selected right before it, a spit absorbs the eat right before it and
//! becomes a teleport, and the two special toggles become a plain toggle.
//! The pass carries only the previous action, so a consumer that does not
//! directly follow its selector is an error rather than a silent guess.

use tracing::warn;
use wits_core::ActionDict;

use crate::action::OsnAction;
use crate::error::OsnError;

/// Reduces one turn's actions. Reducing an already reduced list is a no-op.
pub fn reduce(actions: &[OsnAction]) -> Result<Vec<OsnAction>, OsnError> {
    let mut reduced = Vec::with_capacity(actions.len());
    let mut pending: Option<&OsnAction> = None;

    for (index, action) in actions.iter().enumerate() {
        let selector = pending.take();
        match *action {
            OsnAction::SpawnUnit {
                position,
                spawn: None,
                color,
                class,
            } => {
                let spawn = match selector {
                    Some(&OsnAction::SelectSpawnTile { position }) => position,
                    _ => match position {
                        Some(position) => {
                            warn!(index, "spawn without tile selection, using its own position");
                            position
                        }
                        None => return Err(OsnError::UnpairedSpawn { index }),
                    },
                };
                reduced.push(OsnAction::SpawnUnit {
                    position,
                    spawn: Some(spawn),
                    color,
                    class,
                });
            }
            OsnAction::Spit { index: unit, target } => {
                let Some(&OsnAction::Eat { target: from, .. }) = selector else {
                    return Err(OsnError::UnpairedSpit { index });
                };
                reduced.push(OsnAction::Teleport {
                    index: Some(unit),
                    caster: None,
                    from,
                    to: target,
                });
            }
            OsnAction::ToggleBombShellMode { index, target }
            | OsnAction::RootBramble { index, target } => {
                reduced.push(OsnAction::Toggle {
                    index,
                    position: target,
                });
            }
            OsnAction::SelectSpawnTile { .. } | OsnAction::Eat { .. } => {
                pending = Some(action);
            }
            _ if action.is_scaffolding() => {}
            _ => reduced.push(action.clone()),
        }

        if let Some(dangling) = selector.filter(|_| !consumes(action)) {
            warn!(index, selector = dangling.name(), "selector not followed by its action");
        }
    }

    if let Some(dangling) = pending {
        warn!(selector = dangling.name(), "turn ends on a selector");
    }
    Ok(reduced)
}

fn consumes(action: &OsnAction) -> bool {
    matches!(
        action,
        OsnAction::SpawnUnit { spawn: None, .. } | OsnAction::Spit { .. }
    )
}

/// [`reduce`] followed by the dictionary form of each remaining action.
pub fn reduce_to_dicts(actions: &[OsnAction]) -> Result<Vec<ActionDict>, OsnError> {
    Ok(reduce(actions)?.iter().map(OsnAction::as_dict).collect())
}
