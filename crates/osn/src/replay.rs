//! The legacy replay document.
//!
//! The document carries match metadata, the player seats, the final board
//! state at its top level, league movement in `gameOverData` and the
//! interleaved `replay` frames.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use tracing::{debug, warn};
use wits_core::{ConvertConfig, LeagueRank, LeagueTier, Standings, StandingsAfter, Team, UnitRace};

use crate::boolish::Boolish;
use crate::enums::{PlayerColor, PlayerIndex};
use crate::error::{EnvelopeLayer, OsnError};
use crate::frame::decode_frames;
use crate::game_id::OsnGameId;
use crate::state::GameState;
use crate::turns::{PlayerTurn, reconstruct};

/// A player seat as listed in `settings`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSettings {
    pub name: String,
    #[serde(rename = "gcID")]
    pub gcid: String,
    #[serde(default)]
    pub color: i32,
    pub race: UnitRace,
    #[serde(default)]
    pub team: i32,
    #[serde(rename = "id")]
    pub index: PlayerIndex,
    #[serde(default, rename = "actionPoints")]
    pub action_points: i32,
    #[serde(default, rename = "basePref")]
    pub base_pref: i32,
    #[serde(default, rename = "isInvited")]
    pub invited: Boolish,
    #[serde(default, rename = "isPlaceHolder")]
    pub placeholder: Boolish,
}

impl PlayerSettings {
    pub const fn team(&self) -> Team {
        self.index.team()
    }
}

/// League movement of one player, listed under winners or losers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "gcID")]
    pub gcid: String,
    #[serde(default)]
    pub color: Option<PlayerColor>,
    #[serde(default)]
    pub race: UnitRace,
    #[serde(default)]
    pub team: i32,
    #[serde(default)]
    pub owner: PlayerIndex,
    #[serde(default, rename = "baseHealth")]
    pub base_health: i32,
    #[serde(default, rename = "wasDemoted")]
    pub demoted: Boolish,
    // The archive spells this key with a typo.
    #[serde(default, rename = "wasPrmomoted", alias = "wasPromoted")]
    pub promoted: Boolish,
    #[serde(default, rename = "oldLeague", deserialize_with = "lenient_tier")]
    pub old_league: LeagueTier,
    #[serde(default, rename = "oldLeagueRank")]
    pub old_league_rank: LeagueRank,
    #[serde(default, rename = "newLeague", deserialize_with = "lenient_tier")]
    pub new_league: LeagueTier,
    #[serde(default, rename = "newLeagueRank")]
    pub new_league_rank: LeagueRank,
    #[serde(default, rename = "rankDirection")]
    pub direction: i32,
    #[serde(default, rename = "leaguePointsDelta")]
    pub points_delta: i32,
}

impl PlayerUpdate {
    pub fn before(&self) -> Standings {
        Standings {
            gcid: self.gcid.clone(),
            tier: self.old_league,
            rank: self.old_league_rank,
        }
    }

    pub fn after(&self) -> StandingsAfter {
        StandingsAfter {
            gcid: self.gcid.clone(),
            tier: self.new_league,
            rank: self.new_league_rank,
            delta: self.points_delta,
        }
    }
}

/// Tiers outside the known set are recorded as unranked.
fn lenient_tier<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LeagueTier, D::Error> {
    let name = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    if name.is_empty() {
        return Ok(LeagueTier::Unranked);
    }
    Ok(name.parse().unwrap_or_else(|err| {
        warn!(%err, "treating league tier as unranked");
        LeagueTier::Unranked
    }))
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverData {
    #[serde(default, rename = "isLeagueMatch")]
    pub league_match: Boolish,
    #[serde(default, rename = "isOnline")]
    pub online: Boolish,
    #[serde(default)]
    pub winners: Vec<PlayerUpdate>,
    #[serde(default)]
    pub losers: Vec<PlayerUpdate>,
}

impl GameOverData {
    pub fn is_winner(&self, gcid: &str) -> bool {
        self.winners.iter().any(|player| player.gcid == gcid)
    }

    pub fn is_loser(&self, gcid: &str) -> bool {
        self.losers.iter().any(|player| player.gcid == gcid)
    }
}

/// Fields read directly; the final state is decoded from the same document.
#[derive(Deserialize)]
struct RawReplay {
    game_id: OsnGameId,
    #[serde(default)]
    map_name: String,
    #[serde(default)]
    map_theme: String,
    #[serde(default)]
    settings: Vec<PlayerSettings>,
    #[serde(default, rename = "gameOverData")]
    game_over: GameOverData,
    replay: Vec<Box<RawValue>>,
}

/// A fully decoded legacy replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameReplay {
    pub game_id: OsnGameId,
    pub map_name: String,
    pub map_theme: String,
    pub settings: Vec<PlayerSettings>,
    /// Board state when the recording stopped.
    pub state: GameState,
    pub game_over: GameOverData,
    pub turns: Vec<PlayerTurn>,
}

impl GameReplay {
    /// Decodes the innermost replay document.
    pub fn decode(json: &str, config: &ConvertConfig) -> Result<Self, OsnError> {
        let malformed = |source| OsnError::MalformedEnvelope {
            layer: EnvelopeLayer::Replay,
            source,
        };
        let raw: RawReplay = serde_json::from_str(json).map_err(malformed)?;
        let state: GameState = serde_json::from_str(json).map_err(malformed)?;

        let frames = decode_frames(&raw.replay)?;
        let turns = reconstruct(frames, config)?;
        debug!(
            game_id = %raw.game_id,
            frames = raw.replay.len(),
            turns = turns.len(),
            "decoded legacy replay"
        );

        Ok(Self {
            game_id: raw.game_id,
            map_name: raw.map_name,
            map_theme: raw.map_theme,
            settings: raw.settings,
            state,
            game_over: raw.game_over,
            turns,
        })
    }

    pub fn action_count(&self) -> usize {
        self.turns.iter().map(|turn| turn.actions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(replay: serde_json::Value) -> String {
        json!({
            "game_id": "ahRzfm91dHdpdHRlcnNnYW1lLWhyZHIVCxIIR2FtZVJvb20Yabc123",
            "map_name": "Sharkfood Island",
            "map_theme": "beach",
            "settings": [
                {"name": "ann", "gcID": "G:1", "color": 2, "race": 1, "team": 0, "id": 0,
                 "actionPoints": 7, "isInvited": 0, "isPlaceHolder": false},
                {"name": "bob", "gcID": "G:2", "color": 1, "race": "SCALLYWAGS", "team": 1, "id": 1}
            ],
            "turnCount": 3,
            "units": [],
            "captureTileStates": [],
            "currentPawnID": -1,
            "currentPlayer": 1,
            "hp_base0": 5,
            "hp_base1": 0,
            "outcome": 1,
            "gameOverData": {
                "isLeagueMatch": 1,
                "winners": [{"gcID": "G:1", "oldLeague": "novice", "oldLeagueRank": 40,
                             "newLeague": "Novice", "newLeagueRank": 31, "leaguePointsDelta": 9,
                             "wasPrmomoted": 0}],
                "losers": [{"gcID": "G:2", "oldLeague": "Gold", "newLeague": ""}]
            },
            "replay": replay
        })
        .to_string()
    }

    fn checkpoint(turn: u32) -> serde_json::Value {
        json!({"gameState": {
            "turnCount": turn, "units": [], "captureTileStates": [],
            "currentPawnID": -1, "currentPlayer": 0, "hp_base0": 5, "hp_base1": 5
        }})
    }

    #[test]
    fn decodes_metadata_and_turns() {
        let json = document(json!([
            {"action": {"name": "EndTurnAction"}},
            checkpoint(1),
            {"action": {"name": "StartTurnAction"}},
            {"action": {"name": "SelectUnitAction", "pawnID": 0}},
            {"action": {"name": "EndTurnAction"}},
            checkpoint(2)
        ]));
        let replay = GameReplay::decode(&json, &ConvertConfig::default()).unwrap();
        assert_eq!(replay.game_id.short_id(), "abc123");
        assert_eq!(replay.settings[1].race, UnitRace::Scallywags);
        assert_eq!(replay.settings[1].team(), Team::Blue);
        assert_eq!(replay.state.turn_count, 3);
        assert_eq!(replay.state.outcome, 1);
        assert_eq!(replay.turns.len(), 2);
        assert_eq!(replay.action_count(), 3);
        assert!(replay.game_over.is_winner("G:1"));
        assert!(replay.game_over.is_loser("G:2"));
    }

    #[test]
    fn league_tiers_are_lenient() {
        let json = document(json!([checkpoint(1)]));
        let replay = GameReplay::decode(&json, &ConvertConfig::default()).unwrap();
        let winner = &replay.game_over.winners[0];
        assert_eq!(winner.before().tier, LeagueTier::Novice);
        assert_eq!(winner.after().delta, 9);
        let loser = &replay.game_over.losers[0];
        assert_eq!(loser.old_league, LeagueTier::Unranked);
        assert_eq!(loser.new_league, LeagueTier::Unranked);
    }

    #[test]
    fn missing_frames_is_a_replay_layer_error() {
        let mut value: serde_json::Value = serde_json::from_str(&document(json!([]))).unwrap();
        value.as_object_mut().unwrap().remove("replay");
        let err = GameReplay::decode(&value.to_string(), &ConvertConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            OsnError::MalformedEnvelope {
                layer: EnvelopeLayer::Replay,
                ..
            }
        ));
    }
}
