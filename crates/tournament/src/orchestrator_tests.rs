use super::*;

fn tournament_with(ratings: &[u32]) -> Tournament {
    let mut t = Tournament::new(TournamentConfig::default()).unwrap();
    for (i, &rating) in ratings.iter().enumerate() {
        t.add_player(&format!("Player {}", i + 1), rating);
    }
    t
}

fn boards(t: &Tournament) -> Vec<u32> {
    t.current_round()
        .unwrap()
        .games()
        .map(|m| m.board)
        .collect()
}

#[test]
fn test_five_players_one_absent() {
    let mut t = tournament_with(&[1800, 1750, 1700, 1650, 1600]);
    let absent = PlayerId(2);
    t.set_present(absent, false).unwrap();

    let round = t.pair_next_round(PairingSystem::Dutch).unwrap();
    assert_eq!(round.games().count(), 2);
    let byes: Vec<&Match> = round.byes().collect();
    assert_eq!(byes.len(), 1);
    assert_eq!(byes[0].white, absent);
    assert_eq!(byes[0].result, MatchResult::Bye(ByeKind::Half));

    for board in boards(&t) {
        t.record_result(board, GameResult::Draw).unwrap();
    }
    t.complete_round().unwrap();

    let player = t.standings().get(absent).unwrap();
    assert_eq!(player.score, 0.5);
    assert!(!player.had_full_bye);
    assert!(t.standings().players().iter().all(|p| !p.had_full_bye));
}

#[test]
fn test_seven_players_regular_bye() {
    let mut t = tournament_with(&[1800, 1750, 1700, 1650, 1600, 1550, 1500]);
    let round = t.pair_next_round(PairingSystem::ByRating).unwrap();

    let byes: Vec<&Match> = round.byes().collect();
    assert_eq!(byes.len(), 1);
    // Everyone on zero points: lowest rating gets the bye
    assert_eq!(byes[0].white, PlayerId(6));
    assert_eq!(byes[0].result, MatchResult::Bye(ByeKind::Full));
    assert_eq!(round.games().count(), 3);
    assert!(t.standings().get(PlayerId(6)).unwrap().had_full_bye);
}

#[test]
fn test_results_require_an_active_round() {
    let mut t = tournament_with(&[1800, 1700]);
    assert!(matches!(
        t.record_result(1, GameResult::WhiteWins),
        Err(TournamentError::NoActiveRound)
    ));
    assert!(matches!(
        t.complete_round(),
        Err(TournamentError::NoActiveRound)
    ));
}

#[test]
fn test_cannot_pair_while_round_incomplete() {
    let mut t = tournament_with(&[1800, 1700, 1600, 1500]);
    t.pair_next_round(PairingSystem::ByRating).unwrap();

    assert!(matches!(
        t.pair_next_round(PairingSystem::Dutch),
        Err(TournamentError::RoundInProgress { round: 1 })
    ));
    assert!(matches!(
        t.complete_round(),
        Err(TournamentError::PendingResults { pending: 2 })
    ));

    t.record_result(1, GameResult::WhiteWins).unwrap();
    assert!(matches!(
        t.complete_round(),
        Err(TournamentError::PendingResults { pending: 1 })
    ));
    t.record_result(2, GameResult::BlackWins).unwrap();
    let done = t.complete_round().unwrap();
    assert_eq!(done.state, RoundState::RoundComplete);
    assert!(t.current_round().is_none());
    assert_eq!(t.completed_rounds().len(), 1);
}

#[test]
fn test_result_entry_rules() {
    let mut t = tournament_with(&[1800, 1700, 1600]);
    t.pair_next_round(PairingSystem::ByRating).unwrap();

    assert!(matches!(
        t.record_result(9, GameResult::Draw),
        Err(TournamentError::UnknownBoard(9))
    ));
    // Board 2 is the bye
    assert!(matches!(
        t.record_result(2, GameResult::Draw),
        Err(TournamentError::ByeHasNoResult(2))
    ));
    t.record_result(1, GameResult::Draw).unwrap();
    assert!(matches!(
        t.record_result(1, GameResult::WhiteWins),
        Err(TournamentError::ResultAlreadyRecorded(1))
    ));
}

#[test]
fn test_insufficient_players_aborts_without_changes() {
    let mut t = tournament_with(&[1800, 1700, 1600]);
    t.set_present(PlayerId(0), false).unwrap();
    t.set_present(PlayerId(1), false).unwrap();
    let before = t.clone();

    let err = t.pair_next_round(PairingSystem::Dutch).unwrap_err();
    assert!(matches!(
        err,
        TournamentError::Pairing(PairingError::InsufficientPlayers { eligible: 0 })
    ));
    assert_eq!(t, before);
}

#[test]
fn test_all_rounds_played() {
    let config = TournamentConfig {
        rounds: 1,
        ..Default::default()
    };
    let mut t = Tournament::new(config).unwrap();
    t.add_player("A", 1500);
    t.add_player("B", 1500);
    t.pair_next_round(PairingSystem::ByRating).unwrap();
    t.record_result(1, GameResult::WhiteWins).unwrap();
    t.complete_round().unwrap();

    assert!(t.is_finished());
    assert!(matches!(
        t.pair_next_round(PairingSystem::Dutch),
        Err(TournamentError::AllRoundsPlayed { rounds: 1 })
    ));
}

#[test]
fn test_scores_and_colors_after_round() {
    let mut t = tournament_with(&[1800, 1700]);
    let round = t.pair_next_round(PairingSystem::ByRating).unwrap();
    let game = round.board(1).unwrap().clone();
    // Equal counters and scores: lower rating gets white
    assert_eq!(game.white, PlayerId(1));
    assert_eq!(game.black, Some(PlayerId(0)));

    t.record_result(1, GameResult::BlackWins).unwrap();
    t.complete_round().unwrap();

    let winner = t.standings().get(PlayerId(0)).unwrap();
    let loser = t.standings().get(PlayerId(1)).unwrap();
    assert_eq!(winner.score, 1.0);
    assert_eq!(loser.score, 0.0);
    assert_eq!(winner.color_balance, -1);
    assert_eq!(loser.color_balance, 1);
    assert_eq!(winner.opponents, vec![PlayerId(1)]);
}

#[test]
fn test_fixed_pairs_are_seated_first() {
    let mut t = tournament_with(&[1800, 1750, 1700, 1650, 1600, 1550]);
    let fixed = [(PlayerId(5), PlayerId(0))];
    let round = t
        .pair_next_round_with(PairingSystem::Dutch, &fixed, &[], &SearchBudget::unlimited())
        .unwrap();

    let first = round.board(1).unwrap();
    assert_eq!(first.white, PlayerId(5));
    assert_eq!(first.black, Some(PlayerId(0)));
    assert_eq!(round.games().count(), 3);
    assert_eq!(round.byes().count(), 0);
}

#[test]
fn test_fixed_pairs_validated() {
    let mut t = tournament_with(&[1800, 1750, 1700, 1650]);
    let budget = SearchBudget::unlimited();

    let dup = [(PlayerId(0), PlayerId(1)), (PlayerId(1), PlayerId(2))];
    assert!(matches!(
        t.pair_next_round_with(PairingSystem::Dutch, &dup, &[], &budget),
        Err(TournamentError::Pairing(PairingError::DuplicateInFixedPairs(PlayerId(1))))
    ));

    let unknown = [(PlayerId(0), PlayerId(42))];
    assert!(matches!(
        t.pair_next_round_with(PairingSystem::Dutch, &unknown, &[], &budget),
        Err(TournamentError::Pairing(PairingError::UnknownPlayer(PlayerId(42))))
    ));
    assert!(t.current_round().is_none());
}

#[test]
fn test_forced_rematch_warning() {
    let mut t = tournament_with(&[1800, 1700]);
    t.pair_next_round(PairingSystem::ByRating).unwrap();
    t.record_result(1, GameResult::Draw).unwrap();
    t.complete_round().unwrap();

    let round = t.pair_next_round(PairingSystem::Dutch).unwrap();
    assert_eq!(round.games().count(), 1);
    assert!(round
        .warnings
        .iter()
        .any(|w| matches!(w, PairingWarning::ForcedRematch { .. })));
    assert!(round
        .warnings
        .iter()
        .any(|w| matches!(w, PairingWarning::InfeasiblePairing { .. })));
}

#[test]
fn test_half_bye_fallback_warning() {
    let mut t = tournament_with(&[1800, 1700, 1600]);
    for id in 0..3 {
        t.standings.grant_full_bye(PlayerId(id)).unwrap();
    }
    let round = t.pair_next_round(PairingSystem::Dutch).unwrap();
    let bye = round.byes().next().unwrap();
    assert_eq!(bye.result, MatchResult::Bye(ByeKind::Half));
    assert!(round
        .warnings
        .iter()
        .any(|w| matches!(w, PairingWarning::HalfByeFallback { .. })));
}

#[test]
fn test_fixed_bye_counts_as_the_full_bye() {
    let mut t = tournament_with(&[1800, 1700, 1600, 1500]);
    let budget = SearchBudget::unlimited();

    let round = t
        .pair_next_round_with(PairingSystem::Dutch, &[], &[PlayerId(3)], &budget)
        .unwrap();
    let byes: Vec<(PlayerId, MatchResult)> = round.byes().map(|m| (m.white, m.result)).collect();
    // The chosen bye comes first; the odd remainder still gets a regular bye
    assert_eq!(
        byes,
        vec![
            (PlayerId(3), MatchResult::Bye(ByeKind::Full)),
            (PlayerId(2), MatchResult::Bye(ByeKind::Full)),
        ]
    );
    assert!(t.standings().get(PlayerId(3)).unwrap().had_full_bye);
    t.record_result(1, GameResult::WhiteWins).unwrap();
    t.complete_round().unwrap();

    // A second chosen bye drops to a half bye
    let round = t
        .pair_next_round_with(PairingSystem::Dutch, &[], &[PlayerId(3)], &budget)
        .unwrap();
    let chosen = round.match_for(PlayerId(3)).unwrap();
    assert_eq!(chosen.result, MatchResult::Bye(ByeKind::Half));
    assert!(round
        .warnings
        .iter()
        .any(|w| matches!(w, PairingWarning::HalfByeFallback { player } if *player == PlayerId(3))));

    let regular: Vec<PlayerId> = round
        .byes()
        .filter(|m| m.result == MatchResult::Bye(ByeKind::Full))
        .map(|m| m.white)
        .collect();
    assert_eq!(regular.len(), 1);
    assert!(!regular.contains(&PlayerId(2)));
    assert!(!regular.contains(&PlayerId(3)));
}

#[test]
fn test_fixed_bye_cannot_also_play() {
    let mut t = tournament_with(&[1800, 1700, 1600, 1500]);
    let fixed = [(PlayerId(0), PlayerId(1))];
    assert!(matches!(
        t.pair_next_round_with(
            PairingSystem::Dutch,
            &fixed,
            &[PlayerId(1)],
            &SearchBudget::unlimited()
        ),
        Err(TournamentError::Pairing(PairingError::DuplicateInFixedPairs(PlayerId(1))))
    ));
    assert!(t.current_round().is_none());
}
