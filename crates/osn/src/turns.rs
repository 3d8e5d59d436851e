//! Turn reconstruction.
//!
//! Frames arrive as a flat sequence. Each checkpoint opens a new turn and
//! every following action belongs to it until the next checkpoint. Before
//! the first checkpoint only a stray `EndTurnAction` is tolerated.

use tracing::{debug, warn};
use wits_core::ConvertConfig;

use crate::action::OsnAction;
use crate::error::OsnError;
use crate::frame::Frame;
use crate::state::GameState;

/// A checkpoint and the actions recorded after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerTurn {
    pub state: GameState,
    pub actions: Vec<OsnAction>,
}

impl PlayerTurn {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            actions: Vec::new(),
        }
    }

    pub const fn turn_count(&self) -> u32 {
        self.state.turn_count
    }
}

/// Accumulates frames into turns.
#[derive(Debug)]
pub struct TurnAssembler<'a> {
    config: &'a ConvertConfig,
    turns: Vec<PlayerTurn>,
}

impl<'a> TurnAssembler<'a> {
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self {
            config,
            turns: Vec::new(),
        }
    }

    pub fn push(&mut self, frame: Frame) -> Result<(), OsnError> {
        match frame {
            Frame::Checkpoint(state) => self.open_turn(*state),
            Frame::Action(action) => self.record(action),
        }
    }

    fn open_turn(&mut self, state: GameState) -> Result<(), OsnError> {
        state.base_health(self.config.max_base_health)?;
        if self.config.require_monotonic_turns {
            match self.turns.last().map(PlayerTurn::turn_count) {
                Some(previous) if state.turn_count <= previous => {
                    return Err(OsnError::NonMonotonicTurn {
                        previous,
                        found: state.turn_count,
                    });
                }
                _ => {}
            }
        }
        debug!(turn = state.turn_count, "turn opened");
        self.turns.push(PlayerTurn::new(state));
        Ok(())
    }

    fn record(&mut self, action: OsnAction) -> Result<(), OsnError> {
        match (self.turns.last_mut(), action) {
            (Some(turn), action) => turn.actions.push(action),
            (None, OsnAction::EndTurn) => warn!("dropping EndTurnAction before the first checkpoint"),
            (None, action) => {
                return Err(OsnError::PrematureAction {
                    name: action.name(),
                });
            }
        }
        Ok(())
    }

    /// The turns seen so far, the last one kept even without actions.
    pub fn finish(self) -> Vec<PlayerTurn> {
        self.turns
    }
}

/// Groups decoded frames into turns.
pub fn reconstruct(
    frames: impl IntoIterator<Item = Frame>,
    config: &ConvertConfig,
) -> Result<Vec<PlayerTurn>, OsnError> {
    let mut assembler = TurnAssembler::new(config);
    for frame in frames {
        assembler.push(frame)?;
    }
    Ok(assembler.finish())
}
