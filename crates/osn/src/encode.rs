//! Conversion of a decoded legacy replay into the canonical document.

use tracing::{info, warn};
use wits_core::codec::EnumCodec;
use wits_core::replay::GameReplay as WitsReplay;
use wits_core::{
    CodecError, ConvertConfig, Outcome, PlayerRole, Standings, StandingsAfter, TerminalStatus,
    TurnRecord, UnitPlacement,
};

use crate::error::OsnError;
use crate::reduce::reduce_to_dicts;
use crate::replay::{GameOverData, GameReplay, PlayerUpdate};
use crate::state::UnitStatus;

/// Builds the canonical replay.
///
/// Initial placements come from the first checkpoint, so a replay without
/// turns cannot be converted. The final turn is dropped when nothing is
/// left of it after reduction and `config` asks for it.
pub fn encode_replay(replay: &GameReplay, config: &ConvertConfig) -> Result<WitsReplay, OsnError> {
    let first = replay.turns.first().ok_or(OsnError::EmptyReplay)?;
    let result = TerminalStatus::from_legacy(replay.state.outcome).ok_or_else(|| {
        CodecError::invalid_enum(TerminalStatus::KIND, replay.state.outcome)
    })?;

    let players = replay
        .settings
        .iter()
        .map(|player| PlayerRole {
            name: player.name.clone(),
            gcid: player.gcid.clone(),
            race: player.race,
            team: player.team(),
            result: player_result(&replay.game_over, &player.gcid, result),
        })
        .collect();

    let units = first
        .state
        .units
        .iter()
        .map(|unit: &UnitStatus| UnitPlacement {
            position: unit.position(),
            team: unit.owner.team(),
            class: unit.class.as_wits(),
        })
        .collect();

    let (before, after) = standings(&replay.game_over);
    let outcome = Outcome {
        result,
        before,
        after,
        checkpoint: replay.state.checkpoint(config.max_base_health)?,
    };

    let last = replay.turns.len() - 1;
    let mut turns = Vec::with_capacity(replay.turns.len());
    for (i, turn) in replay.turns.iter().enumerate() {
        let actions = reduce_to_dicts(&turn.actions)?;
        if actions.is_empty() && i == last && config.drop_trailing_empty_turn {
            continue;
        }
        turns.push(TurnRecord {
            turn: turn.turn_count(),
            actions,
            checkpoint: turn.state.checkpoint(config.max_base_health)?,
        });
    }

    let encoded = WitsReplay {
        game_id: replay.game_id.short_id().to_owned(),
        map_name: replay.map_name.clone(),
        map_theme: replay.map_theme.clone(),
        players,
        units,
        outcome,
        replay: turns,
    };
    info!(
        game_id = %encoded.game_id,
        turns = encoded.turn_count(),
        actions = encoded.action_count(),
        %result,
        "converted replay"
    );
    Ok(encoded)
}

/// Winners see the match result, losers its opposite.
fn player_result(
    game_over: &GameOverData,
    gcid: &str,
    result: TerminalStatus,
) -> Option<TerminalStatus> {
    if result == TerminalStatus::Unknown {
        None
    } else if game_over.is_winner(gcid) {
        Some(result)
    } else if game_over.is_loser(gcid) {
        Some(result.opposing())
    } else {
        None
    }
}

/// `[winner, loser]` slots, defaulted when a side is missing. Further
/// players of a duos match follow in winners-then-losers order.
fn standings(game_over: &GameOverData) -> (Vec<Standings>, Vec<StandingsAfter>) {
    let mut before = vec![Standings::default(); 2];
    let mut after = vec![StandingsAfter::default(); 2];
    let mut extra: Vec<&PlayerUpdate> = Vec::new();

    for (slot, side) in [&game_over.winners, &game_over.losers].into_iter().enumerate() {
        let mut players = side.iter();
        if let Some(player) = players.next() {
            before[slot] = player.before();
            after[slot] = player.after();
        }
        extra.extend(players);
    }
    extra.sort_by_key(|player| !game_over.is_winner(&player.gcid));
    if !extra.is_empty() {
        warn!(count = extra.len(), "appending standings beyond the winner and loser slots");
    }
    for player in extra {
        before.push(player.before());
        after.push(player.after());
    }
    (before, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::OsnAction;
    use crate::enums::{LegacyClass, PlayerColor};
    use crate::game_id::OsnGameId;
    use crate::replay::PlayerSettings;
    use crate::state::GameState;
    use crate::turns::PlayerTurn;
    use wits_core::{HexCoord, LeagueTier, Team, UnitClass, UnitRace};

    fn state(turn_count: u32) -> GameState {
        serde_json::from_value(serde_json::json!({
            "turnCount": turn_count,
            "units": [
                {"identifier": 0, "owner": 0, "class": 2, "race": 1,
                 "positionI": 2, "positionJ": 7, "health": 2},
                {"identifier": 1, "owner": 1, "class": 7, "race": 2,
                 "positionI": 9, "positionJ": 2, "health": 3}
            ],
            "captureTileStates": [],
            "currentPawnID": -1,
            "currentPlayer": 0,
            "hp_base0": 5,
            "hp_base1": 5
        }))
        .unwrap()
    }

    fn update(gcid: &str, delta: i32) -> PlayerUpdate {
        PlayerUpdate {
            gcid: gcid.into(),
            old_league: LeagueTier::Novice,
            new_league: LeagueTier::Novice,
            points_delta: delta,
            ..PlayerUpdate::default()
        }
    }

    fn replay(turns: Vec<PlayerTurn>) -> GameReplay {
        let mut final_state = state(9);
        final_state.outcome = 2;
        GameReplay {
            game_id: OsnGameId::new("ahRzfm91dHdpdHRlcnNnYW1lLWhyZHIVCxIIR2FtZVJvb20Yxyz"),
            map_name: "Sharkfood Island".into(),
            map_theme: "beach".into(),
            settings: vec![
                PlayerSettings {
                    name: "ann".into(),
                    gcid: "G:1".into(),
                    race: UnitRace::Feedback,
                    ..PlayerSettings::default()
                },
                PlayerSettings {
                    name: "bob".into(),
                    gcid: "G:2".into(),
                    race: UnitRace::Adorables,
                    index: crate::enums::PlayerIndex::Player2,
                    ..PlayerSettings::default()
                },
            ],
            state: final_state,
            game_over: GameOverData {
                winners: vec![update("G:1", 12)],
                losers: vec![update("G:2", -12)],
                ..GameOverData::default()
            },
            turns,
        }
    }

    fn spawn_turn(turn_count: u32) -> PlayerTurn {
        PlayerTurn {
            state: state(turn_count),
            actions: vec![
                OsnAction::StartTurn,
                OsnAction::SelectSpawnTile {
                    position: HexCoord::new(2, 7),
                },
                OsnAction::SpawnUnit {
                    position: None,
                    spawn: None,
                    color: PlayerColor::Red,
                    class: LegacyClass::Soldier,
                },
                OsnAction::EndTurn,
            ],
        }
    }

    #[test]
    fn builds_the_canonical_document() {
        let turns = vec![spawn_turn(1), PlayerTurn::new(state(2))];
        let encoded = encode_replay(&replay(turns), &ConvertConfig::default()).unwrap();

        assert_eq!(encoded.game_id, "xyz");
        assert_eq!(encoded.players[1].team, Team::Blue);
        assert_eq!(encoded.players[0].result, Some(TerminalStatus::VictoryExtinction));
        assert_eq!(encoded.players[1].result, Some(TerminalStatus::LossExtinction));
        assert_eq!(encoded.units.len(), 2);
        assert_eq!(encoded.units[1].class, UnitClass::Special);
        assert_eq!(encoded.outcome.result, TerminalStatus::VictoryExtinction);
        assert_eq!(encoded.outcome.before[0].gcid, "G:1");
        assert_eq!(encoded.outcome.after[1].delta, -12);

        // The trailing turn has no actions and is dropped.
        assert_eq!(encoded.turn_count(), 1);
        assert_eq!(encoded.replay[0].turn, 1);
        assert_eq!(encoded.replay[0].action_names().collect::<Vec<_>>(), ["SpawnUnitAction"]);
    }

    #[test]
    fn trailing_empty_turn_can_be_kept() {
        let turns = vec![spawn_turn(1), PlayerTurn::new(state(2))];
        let encoded = encode_replay(&replay(turns), &ConvertConfig::lenient()).unwrap();
        assert_eq!(encoded.turn_count(), 2);
    }

    #[test]
    fn empty_middle_turns_are_kept() {
        let turns = vec![PlayerTurn::new(state(1)), spawn_turn(2)];
        let encoded = encode_replay(&replay(turns), &ConvertConfig::default()).unwrap();
        assert_eq!(encoded.turn_count(), 2);
        assert!(encoded.replay[0].actions.is_empty());
    }

    #[test]
    fn replay_without_turns_fails() {
        assert!(matches!(
            encode_replay(&replay(Vec::new()), &ConvertConfig::default()),
            Err(OsnError::EmptyReplay)
        ));
    }

    #[test]
    fn unknown_game_status_fails() {
        let mut legacy = replay(vec![spawn_turn(1)]);
        legacy.state.outcome = 9;
        assert!(matches!(
            encode_replay(&legacy, &ConvertConfig::default()),
            Err(OsnError::Codec(CodecError::InvalidEnumValue { .. }))
        ));
    }

    #[test]
    fn duos_standings_are_appended() {
        let game_over = GameOverData {
            winners: vec![update("G:1", 5), update("G:3", 4)],
            losers: vec![update("G:2", -5), update("G:4", -4)],
            ..GameOverData::default()
        };
        let (before, after) = standings(&game_over);
        let order: Vec<_> = before.iter().map(|s| s.gcid.as_str()).collect();
        assert_eq!(order, ["G:1", "G:2", "G:3", "G:4"]);
        assert_eq!(after[3].delta, -4);

        let (before, _) = standings(&GameOverData::default());
        assert_eq!(before, vec![Standings::default(); 2]);
    }
}
