//! Errors raised while reading legacy replays.

use core::fmt;

use wits_core::{CodecError, ErrorSeverity, WitsError};

/// One of the three nested JSON documents of the wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnvelopeLayer {
    /// `{"viewResponse": ...}`
    ViewResponse,
    /// `{"gameState": "<replay json>"}`, embedded as a string.
    GameState,
    /// The replay document itself.
    Replay,
}

impl EnvelopeLayer {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewResponse => "viewResponse",
            Self::GameState => "gameState",
            Self::Replay => "replay",
        }
    }
}

impl fmt::Display for EnvelopeLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the legacy replay pipeline.
///
/// Every variant aborts the replay being read; nothing here is recovered
/// from inside a single record.
#[derive(Debug, thiserror::Error)]
pub enum OsnError {
    #[error("failed to read replay stream: {0}")]
    Io(#[from] std::io::Error),

    /// One of the envelope layers is not JSON or lacks its nested field.
    #[error("malformed wire envelope at the {layer} layer: {source}")]
    MalformedEnvelope {
        layer: EnvelopeLayer,
        #[source]
        source: serde_json::Error,
    },

    /// An action frame whose `name` is not in the dispatch table.
    #[error("unrecognized action type {name:?}")]
    UnrecognizedAction { name: String },

    /// A known action whose fields do not match its shape.
    #[error("malformed {name}: {source}")]
    MalformedAction {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A frame that is neither a checkpoint nor a named action.
    #[error("frame {index} has neither a gameState nor an action name")]
    UnclassifiedFrame { index: usize },

    #[error("frame {index} is not a valid checkpoint: {source}")]
    MalformedCheckpoint {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// An action other than EndTurn before the first checkpoint.
    #[error("before-state action of type {name}")]
    PrematureAction { name: &'static str },

    #[error("turn count {found} does not follow turn {previous}")]
    NonMonotonicTurn { previous: u32, found: u32 },

    #[error("base health {health} on turn {turn} is outside 0..={max}")]
    InvalidBaseHealth { turn: u32, health: i32, max: u8 },

    /// A spawn that is neither preceded by its tile selection nor carries
    /// its own position.
    #[error("spawn at action {index} has no selected spawn tile")]
    UnpairedSpawn { index: usize },

    /// A spit that does not directly follow the eat it completes.
    #[error("spit at action {index} is not preceded by an eat")]
    UnpairedSpit { index: usize },

    #[error("no unit with index {index} in the checkpoint of turn {turn}")]
    UnknownUnit { index: i32, turn: u32 },

    /// A replay without a single checkpoint has no initial units.
    #[error("replay has no turns")]
    EmptyReplay,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl WitsError for OsnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Codec(err) => err.severity(),
            Self::UnpairedSpawn { .. } | Self::UnpairedSpit { .. } | Self::UnknownUnit { .. } => {
                ErrorSeverity::Internal
            }
            Self::InvalidBaseHealth { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "OSN_IO",
            Self::MalformedEnvelope { .. } => "OSN_MALFORMED_ENVELOPE",
            Self::UnrecognizedAction { .. } => "OSN_UNRECOGNIZED_ACTION",
            Self::MalformedAction { .. } => "OSN_MALFORMED_ACTION",
            Self::UnclassifiedFrame { .. } => "OSN_UNCLASSIFIED_FRAME",
            Self::MalformedCheckpoint { .. } => "OSN_MALFORMED_CHECKPOINT",
            Self::PrematureAction { .. } => "OSN_PREMATURE_ACTION",
            Self::NonMonotonicTurn { .. } => "OSN_NON_MONOTONIC_TURN",
            Self::InvalidBaseHealth { .. } => "OSN_INVALID_BASE_HEALTH",
            Self::UnpairedSpawn { .. } => "OSN_UNPAIRED_SPAWN",
            Self::UnpairedSpit { .. } => "OSN_UNPAIRED_SPIT",
            Self::UnknownUnit { .. } => "OSN_UNKNOWN_UNIT",
            Self::EmptyReplay => "OSN_EMPTY_REPLAY",
            Self::Codec(err) => err.error_code(),
        }
    }
}
