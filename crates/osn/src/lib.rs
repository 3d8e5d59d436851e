//! Reader for the legacy ("OSN") replay archive.
//!
//! A replay travels through four stages:
//!
//! 1. [`wire`] unwraps the string-embedded envelope around the document.
//! 2. [`replay`] decodes the document; its frames are classified by
//!    [`frame`] and grouped into turns by [`turns`].
//! 3. [`reduce`] collapses each turn's legacy actions.
//! 4. [`encode`] writes the canonical `wits-core` replay; [`lift`] offers
//!    the same turns as canonical [`wits_core::PlayerAction`]s.
//!
//! Any malformed piece aborts the whole replay with an [`OsnError`].
pub mod action;
pub mod boolish;
pub mod encode;
pub mod enums;
pub mod error;
pub mod frame;
pub mod game_id;
pub mod lift;
pub mod reduce;
pub mod replay;
pub mod state;
pub mod turns;
pub mod wire;

pub use action::{OsnAction, UnitIndex, decode_action};
pub use boolish::Boolish;
pub use encode::encode_replay;
pub use enums::{LegacyClass, PlayerColor, PlayerIndex};
pub use error::{EnvelopeLayer, OsnError};
pub use frame::{Frame, decode_frames};
pub use game_id::{COMMON_PREFIX, OsnGameId};
pub use lift::{lift_turn, lift_turns};
pub use reduce::{reduce, reduce_to_dicts};
pub use replay::{GameOverData, GameReplay, PlayerSettings, PlayerUpdate};
pub use state::{CaptureTileState, GameState, LegacyCoord, UnitStatus, UsedSpawn};
pub use turns::{PlayerTurn, TurnAssembler, reconstruct};
pub use wire::{ViewResponse, parse_replay, parse_replay_with, unwrap_envelope, view_response};
