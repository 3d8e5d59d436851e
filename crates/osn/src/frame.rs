//! Classification of replay frames.
//!
//! The legacy `replay` array interleaves checkpoints and actions without a
//! type tag. Each frame is probed once: a non-null `gameState` makes it a
//! checkpoint, otherwise a non-empty `action.name` makes it an action, and
//! anything else is rejected.

use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::trace;

use crate::action::{OsnAction, decode_action};
use crate::error::OsnError;
use crate::state::GameState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Checkpoint(Box<GameState>),
    Action(OsnAction),
}

#[derive(Deserialize)]
struct Probe<'a> {
    #[serde(default, borrow, rename = "gameState")]
    state: Option<&'a RawValue>,
    #[serde(default)]
    action: Option<ActionProbe>,
}

#[derive(Deserialize)]
struct ActionProbe {
    #[serde(default)]
    name: String,
}

impl Frame {
    /// Classifies and decodes the frame at `index` of the replay array.
    pub fn decode(index: usize, raw: &RawValue) -> Result<Self, OsnError> {
        let malformed = |source| OsnError::MalformedCheckpoint { index, source };
        let probe: Probe<'_> = serde_json::from_str(raw.get()).map_err(malformed)?;

        if let Some(state) = probe.state.filter(|state| state.get() != "null") {
            let state: GameState = serde_json::from_str(state.get()).map_err(malformed)?;
            trace!(index, turn = state.turn_count, "checkpoint frame");
            return Ok(Self::Checkpoint(Box::new(state)));
        }

        match probe.action {
            Some(ActionProbe { name }) if !name.is_empty() => {
                trace!(index, action = %name, "action frame");
                decode_action(&name, raw.get()).map(Self::Action)
            }
            _ => Err(OsnError::UnclassifiedFrame { index }),
        }
    }

    pub const fn is_checkpoint(&self) -> bool {
        matches!(self, Self::Checkpoint(_))
    }
}

/// Decodes every frame in order, stopping at the first bad one.
pub fn decode_frames(frames: &[Box<RawValue>]) -> Result<Vec<Frame>, OsnError> {
    frames
        .iter()
        .enumerate()
        .map(|(index, raw)| Frame::decode(index, raw))
        .collect()
}
