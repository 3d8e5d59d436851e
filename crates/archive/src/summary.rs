//! Queryable fields of an archived match.

use serde::{Deserialize, Serialize};
use wits_core::TerminalStatus;
use wits_core::replay::GameReplay;

/// Where a match is in the fetch / unwrap / convert process.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum FetchStatus {
    Unknown,
    #[default]
    Listed,
    Fetched,
    Unwrapped,
    Converted,
    Canonical,
    Validated,
    Indexed,
    Invalid,
    Legacy,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: String,
    pub map_name: String,
    pub map_theme: String,
    pub turn_count: usize,
    pub action_count: usize,
    pub result: TerminalStatus,
    /// Player ids (`gcID`) in seat order.
    pub players: Vec<String>,
    pub fetch_status: FetchStatus,
}

impl MatchSummary {
    /// Summary of a converted replay.
    pub fn of(replay: &GameReplay) -> Self {
        Self {
            match_id: replay.game_id.clone(),
            map_name: replay.map_name.clone(),
            map_theme: replay.map_theme.clone(),
            turn_count: replay.turn_count(),
            action_count: replay.action_count(),
            result: replay.outcome.result,
            players: replay.players.iter().map(|p| p.gcid.clone()).collect(),
            fetch_status: FetchStatus::Converted,
        }
    }

    pub fn has_player(&self, gcid: &str) -> bool {
        self.players.iter().any(|player| player == gcid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wits_core::PlayerRole;

    #[test]
    fn summarizes_a_replay() {
        let replay = GameReplay {
            game_id: "abc".into(),
            map_name: "Sharkfood Island".into(),
            players: vec![PlayerRole {
                gcid: "G:7".into(),
                ..PlayerRole::default()
            }],
            ..GameReplay::default()
        };
        let summary = MatchSummary::of(&replay);
        assert_eq!(summary.match_id, "abc");
        assert_eq!(summary.fetch_status, FetchStatus::Converted);
        assert!(summary.has_player("G:7"));
        assert!(!summary.has_player("G:8"));
    }

    #[test]
    fn status_names() {
        assert_eq!(FetchStatus::default().to_string(), "LISTED");
        assert_eq!("legacy".parse::<FetchStatus>(), Ok(FetchStatus::Legacy));
        assert_eq!(serde_json::to_string(&FetchStatus::Invalid).unwrap(), r#""INVALID""#);
    }
}
