//! Tests for the pairing pipeline without the round runner
//!
//! Byes, pool pairing and color assignment are chained by hand here the
//! same way the tournament crate chains them.

use std::collections::HashSet;
use swiss_core::{
    apply_colors, assign_colors, pair_pool, resolve_byes, ByeKind, PairingConfig, PairingSystem,
    Player, PlayerId, SearchBudget, Standings,
};

fn club(ratings: &[u32]) -> Standings {
    let mut standings = Standings::new();
    for (i, &rating) in ratings.iter().enumerate() {
        standings.register(&format!("Player {}", i + 1), rating);
    }
    standings
}

/// Pair one round, let the higher rating win every game, and return the games
fn play_round(standings: &mut Standings, round: u32) -> Vec<(PlayerId, PlayerId)> {
    let config = PairingConfig::default();
    let candidates: Vec<&Player> = standings.players().iter().collect();
    let decision = resolve_byes(&candidates);
    let pool: Vec<&Player> = decision
        .pool
        .iter()
        .map(|&id| standings.require(id).unwrap())
        .collect();
    let pairing = pair_pool(
        &pool,
        PairingSystem::Dutch,
        &config,
        round,
        &SearchBudget::unlimited(),
    )
    .unwrap();
    assert!(pairing.infeasible.is_empty());

    let seats: Vec<(PlayerId, PlayerId)> = pairing
        .pairs
        .iter()
        .map(|&(a, b)| {
            let (white, black) =
                assign_colors(standings.require(a).unwrap(), standings.require(b).unwrap());
            (white.id, black.id)
        })
        .collect();
    let awards = decision.awards.clone();

    for &(white, black) in &seats {
        let (w, b) = standings.pair_mut(white, black).unwrap();
        w.opponents.push(black);
        b.opponents.push(white);
        apply_colors(w, b);
        let winner = if w.rating >= b.rating { white } else { black };
        standings.add_points(winner, 1.0).unwrap();
    }
    for award in awards {
        if award.kind == ByeKind::Full {
            standings.grant_full_bye(award.player).unwrap();
        }
        standings.add_points(award.player, award.kind.points()).unwrap();
    }
    seats
}

#[test]
fn test_four_rounds_without_rematches() {
    let mut standings = club(&[2000, 1900, 1850, 1800, 1700, 1650, 1600, 1550]);
    let mut played = HashSet::new();

    for round in 1..=4 {
        let seats = play_round(&mut standings, round);
        assert_eq!(seats.len(), 4);
        for (white, black) in seats {
            let key = (white.min(black), white.max(black));
            assert!(played.insert(key), "rematch in round {}", round);
        }
    }

    for player in standings.players() {
        assert_eq!(player.games_played(), 4);
    }
    let balance: i32 = standings.players().iter().map(|p| p.color_balance).sum();
    assert_eq!(balance, 0);
}

#[test]
fn test_absent_player_and_odd_field() {
    let mut standings = club(&[1800, 1750, 1700, 1650, 1600, 1550, 1500, 1450, 1400, 1350]);
    standings.set_present(PlayerId(3), false).unwrap();
    standings.set_present(PlayerId(4), false).unwrap();
    standings.set_present(PlayerId(5), false).unwrap();

    // Seven present: one regular bye plus three half byes
    let seats = play_round(&mut standings, 1);
    assert_eq!(seats.len(), 3);

    let bye = standings.get(PlayerId(9)).unwrap();
    assert!(bye.had_full_bye);
    assert_eq!(bye.score, 1.0);
    for id in 3..=5 {
        let absent = standings.get(PlayerId(id)).unwrap();
        assert_eq!(absent.score, 0.5);
        assert!(!absent.had_full_bye);
        assert!(absent.opponents.is_empty());
    }

    let seated: HashSet<PlayerId> = seats.iter().flat_map(|&(w, b)| [w, b]).collect();
    assert_eq!(seated.len(), 6);
}
