//! Text reports: pairings and standings

use swiss_core::{PlayerId, Standings};

use crate::orchestrator::Tournament;
use crate::round::Round;

fn name_of(standings: &Standings, id: PlayerId) -> String {
    standings
        .get(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Pairings of one round, one board per line
pub fn pairings_report(round: &Round, standings: &Standings) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "=== Round {} pairings ({}) ===\n",
        round.number, round.system
    ));
    report.push_str(&format!(
        "{:>5}  {:<24} {:^9} {:<24}\n",
        "Board", "White", "Result", "Black"
    ));
    report.push_str(&"-".repeat(66));
    report.push('\n');

    for m in &round.matches {
        let black = m
            .black
            .map(|id| name_of(standings, id))
            .unwrap_or_default();
        report.push_str(&format!(
            "{:>5}  {:<24} {:^9} {:<24}\n",
            m.board,
            name_of(standings, m.white),
            m.result.to_string(),
            black
        ));
    }

    if !round.warnings.is_empty() {
        report.push_str("\nWarnings:\n");
        for warning in &round.warnings {
            report.push_str(&format!("  - {}\n", warning));
        }
    }
    report
}

/// Standings table ranked by score, rating and id
pub fn standings_report(standings: &Standings, title: &str) -> String {
    let mut report = String::new();
    report.push_str(&format!("=== {} ===\n", title));
    report.push_str(&format!(
        "{:>4}  {:<24} {:>6} {:>6} {:>6} {:>4}\n",
        "Rank", "Player", "Rating", "Score", "Color", "Bye"
    ));
    report.push_str(&"-".repeat(56));
    report.push('\n');

    for (rank, player) in standings.ranked().iter().enumerate() {
        report.push_str(&format!(
            "{:>4}  {:<24} {:>6} {:>6.1} {:>+6} {:>4}\n",
            rank + 1,
            player.name,
            player.rating,
            player.score,
            player.color_balance,
            if player.had_full_bye { "yes" } else { "" }
        ));
    }
    report
}

/// Standings headed with the tournament name and progress
pub fn tournament_report(tournament: &Tournament) -> String {
    let played = tournament.completed_rounds().len();
    let title = format!(
        "{} | Standings after round {} / {}",
        tournament.config().name,
        played,
        tournament.config().rounds
    );
    standings_report(tournament.standings(), &title)
}
