//! Seeded tournament simulation
//!
//! Builds a synthetic field, pairs round one by rating and later rounds with
//! the Dutch system, and draws results from the Elo expectation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swiss_core::{ConfigError, PairingConfig, PairingSystem, PlayerId};
use tracing::info;

use crate::config::TournamentConfig;
use crate::error::TournamentError;
use crate::orchestrator::Tournament;
use crate::round::GameResult;

/// Share of games drawn regardless of the rating gap
const DRAW_RATE: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub players: usize,
    pub rounds: u32,
    pub seed: u64,
    /// Chance that a player sits out any given round
    pub absence_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            players: 14,
            rounds: 6,
            seed: 0,
            absence_rate: 0.0,
        }
    }
}

/// Expected score of `a` against `b`
pub fn expected_score(a: u32, b: u32) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((b as f64 - a as f64) / 400.0))
}

fn random_result(rng: &mut StdRng, white: u32, black: u32) -> GameResult {
    if rng.gen_bool(DRAW_RATE) {
        return GameResult::Draw;
    }
    if rng.gen_bool(expected_score(white, black)) {
        GameResult::WhiteWins
    } else {
        GameResult::BlackWins
    }
}

/// Run a whole tournament with random results
pub fn simulate(
    sim: &SimulationConfig,
    pairing: PairingConfig,
) -> Result<Tournament, TournamentError> {
    if !(0.0..=1.0).contains(&sim.absence_rate) {
        return Err(ConfigError::OutOfRange {
            field: "absence_rate",
            value: sim.absence_rate,
            expected: "a probability between 0 and 1",
        }
        .into());
    }

    let mut rng = StdRng::seed_from_u64(sim.seed);
    let config = TournamentConfig {
        name: format!("Simulation (seed {})", sim.seed),
        rounds: sim.rounds,
        pairing,
    };
    let mut tournament = Tournament::new(config)?;

    for i in 0..sim.players {
        // Ratings between 400 and 2000 in steps of 50
        let rating = 400 + 50 * rng.gen_range(0..=32);
        tournament.add_player(&format!("Player {:02}", i + 1), rating);
    }

    for number in 1..=sim.rounds {
        let ids: Vec<PlayerId> = tournament.standings().players().iter().map(|p| p.id).collect();
        let presence: Vec<bool> = ids
            .iter()
            .map(|_| !rng.gen_bool(sim.absence_rate))
            .collect();
        // A round needs at least two players at the boards
        let everyone = presence.iter().filter(|&&p| p).count() < 2;
        for (&id, &present) in ids.iter().zip(&presence) {
            tournament.set_present(id, present || everyone)?;
        }

        let system = if number == 1 {
            PairingSystem::ByRating
        } else {
            PairingSystem::Dutch
        };
        let round = tournament.pair_next_round(system)?;

        let games: Vec<(u32, PlayerId, PlayerId)> = round
            .games()
            .filter_map(|m| m.black.map(|black| (m.board, m.white, black)))
            .collect();
        for (board, white, black) in games {
            let rating_of = |id| {
                tournament
                    .standings()
                    .get(id)
                    .map(|p| p.rating)
                    .unwrap_or_default()
            };
            let result = random_result(&mut rng, rating_of(white), rating_of(black));
            tournament.record_result(board, result)?;
        }
        tournament.complete_round()?;
        info!(round = number, "Simulated round finished");
    }

    Ok(tournament)
}
