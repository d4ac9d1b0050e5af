//! Tests for saving and loading tournament state

use swiss_core::{PairingSystem, PlayerId};
use tempfile::tempdir;
use tournament::{GameResult, RoundState, Tournament, TournamentConfig, TournamentError};

fn played_tournament() -> Tournament {
    let mut t = Tournament::new(TournamentConfig::default()).unwrap();
    for (name, rating) in [("Alice", 1800), ("Bob", 1700), ("Carol", 1600)] {
        t.add_player(name, rating);
    }
    t.pair_next_round(PairingSystem::ByRating).unwrap();
    t.record_result(1, GameResult::WhiteWins).unwrap();
    t.complete_round().unwrap();
    t
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let t = played_tournament();
    t.save(&path).unwrap();
    let loaded = Tournament::load(&path).unwrap();
    assert_eq!(loaded, t);

    let carol = loaded.standings().get(PlayerId(2)).unwrap();
    assert!(carol.had_full_bye);
    assert_eq!(carol.score, 1.0);
    let bob = loaded.standings().get(PlayerId(1)).unwrap();
    assert_eq!(bob.color_balance, 1);
}

#[test]
fn test_resume_mid_round() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut t = played_tournament();
    t.pair_next_round(PairingSystem::Dutch).unwrap();
    t.save(&path).unwrap();

    let mut loaded = Tournament::load(&path).unwrap();
    let round = loaded.current_round().unwrap();
    assert_eq!(round.number, 2);
    assert_eq!(round.state, RoundState::AwaitingResults);

    let board = round.games().next().unwrap().board;
    loaded.record_result(board, GameResult::Draw).unwrap();
    loaded.complete_round().unwrap();
    assert_eq!(loaded.completed_rounds().len(), 2);
}

#[test]
fn test_load_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let t = played_tournament();
    let mut value = serde_json::to_value(&t).unwrap();
    value["config"]["pairing"]["rating_divisor"] = serde_json::json!(0.0);
    std::fs::write(&path, value.to_string()).unwrap();

    assert!(matches!(
        Tournament::load(&path),
        Err(TournamentError::Config(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = Tournament::load(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, TournamentError::Io(_)));
}

#[test]
fn test_load_rejects_reordered_players() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state.json");

    let t = played_tournament();
    let mut value = serde_json::to_value(&t).unwrap();
    if let Some(players) = value["standings"]["players"].as_array_mut() {
        players.reverse();
    }
    std::fs::write(&path, value.to_string()).unwrap();
    assert!(matches!(
        Tournament::load(&path),
        Err(TournamentError::InconsistentStandings)
    ));

    let mut value = serde_json::to_value(&t).unwrap();
    value["standings"]["next_id"] = serde_json::json!(1);
    std::fs::write(&path, value.to_string()).unwrap();
    assert!(matches!(
        Tournament::load(&path),
        Err(TournamentError::InconsistentStandings)
    ));
}
