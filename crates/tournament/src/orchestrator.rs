//! Round orchestration
//!
//! Each round runs `AwaitingPairing -> PairingGenerated -> AwaitingResults ->
//! RoundComplete`. Pairing resolves byes, searches the pool and assigns
//! colors; completing the round adds every result to the standings. A new
//! round cannot be paired while the previous one is incomplete.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use swiss_core::{
    apply_colors, assign_bye, assign_colors, pair_pool, resolve_byes, ByeKind, ByeReason,
    PairingError, PairingSystem, Player, PlayerId, SearchBudget, Standings,
};
use tracing::{info, warn};

use crate::config::TournamentConfig;
use crate::error::TournamentError;
use crate::round::{GameResult, Match, MatchResult, PairingWarning, Round, RoundState};

/// The authoritative tournament state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    config: TournamentConfig,
    standings: Standings,
    completed: Vec<Round>,
    current: Option<Round>,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Result<Self, TournamentError> {
        config.validate()?;
        Ok(Self {
            config,
            standings: Standings::new(),
            completed: Vec::new(),
            current: None,
        })
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn completed_rounds(&self) -> &[Round] {
        &self.completed
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    /// Number of the round in progress, or of the next one to pair
    pub fn round_number(&self) -> u32 {
        self.completed.len() as u32 + 1
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none() && self.completed.len() as u32 >= self.config.rounds
    }

    /// Register a player. A known name only updates the rating.
    pub fn add_player(&mut self, name: &str, rating: u32) -> PlayerId {
        let id = self.standings.register(name, rating);
        info!(player = %id, name, rating, "Player registered");
        id
    }

    pub fn set_present(&mut self, id: PlayerId, present: bool) -> Result<(), TournamentError> {
        self.standings.set_present(id, present)?;
        Ok(())
    }

    /// Pair the next round with the configured search budget
    pub fn pair_next_round(&mut self, system: PairingSystem) -> Result<&Round, TournamentError> {
        let budget = SearchBudget::from_millis(self.config.pairing.time_limit_ms);
        self.pair_next_round_with(system, &[], &[], &budget)
    }

    /// Pair the next round. `fixed` games are seated as given (white first)
    /// and `byes` players sit out, both before the remaining byes are
    /// resolved; `budget` can interrupt the search.
    pub fn pair_next_round_with(
        &mut self,
        system: PairingSystem,
        fixed: &[(PlayerId, PlayerId)],
        byes: &[PlayerId],
        budget: &SearchBudget,
    ) -> Result<&Round, TournamentError> {
        if let Some(round) = &self.current {
            return Err(TournamentError::RoundInProgress {
                round: round.number,
            });
        }
        if self.completed.len() as u32 >= self.config.rounds {
            return Err(TournamentError::AllRoundsPlayed {
                rounds: self.config.rounds,
            });
        }

        let number = self.round_number();
        let mut round = Round::new(number, system);

        let mut seated = HashSet::new();
        let listed = fixed.iter().flat_map(|&(white, black)| [white, black]);
        for id in listed.chain(byes.iter().copied()) {
            self.standings.require(id)?;
            if !seated.insert(id) {
                return Err(PairingError::DuplicateInFixedPairs(id).into());
            }
        }
        let mut awards = byes
            .iter()
            .map(|&id| self.standings.require(id).map(assign_bye))
            .collect::<Result<Vec<_>, _>>()?;

        let candidates: Vec<&Player> = self
            .standings
            .players()
            .iter()
            .filter(|p| !seated.contains(&p.id))
            .collect();
        let decision = resolve_byes(&candidates);
        awards.extend(decision.awards.iter().copied());
        if fixed.is_empty() && decision.pool.len() < 2 {
            return Err(PairingError::InsufficientPlayers {
                eligible: decision.pool.len(),
            }
            .into());
        }

        let pool = decision
            .pool
            .iter()
            .map(|&id| self.standings.require(id))
            .collect::<Result<Vec<_>, _>>()?;
        let pairing = pair_pool(&pool, system, &self.config.pairing, number, budget)?;

        let mut seats: Vec<(PlayerId, PlayerId)> = fixed.to_vec();
        for &(a, b) in &pairing.pairs {
            let (white, black) = assign_colors(self.standings.require(a)?, self.standings.require(b)?);
            seats.push((white.id, black.id));
        }

        // Nothing below can fail for ids that were just looked up, so the
        // standings are only touched once the whole round is decided.
        let mut board = 0;
        for &(white, black) in &seats {
            let (w, b) = self.standings.pair_mut(white, black)?;
            w.opponents.push(black);
            b.opponents.push(white);
            apply_colors(w, b);
            board += 1;
            round.matches.push(Match::game(number, board, white, black));
        }

        for award in &awards {
            if award.kind == ByeKind::Full {
                self.standings.grant_full_bye(award.player)?;
            }
            if award.reason == ByeReason::NoFullByeLeft {
                round.warnings.push(PairingWarning::HalfByeFallback {
                    player: award.player,
                });
            }
            board += 1;
            round
                .matches
                .push(Match::bye(number, board, award.player, award.kind));
            info!(round = number, player = %award.player, kind = ?award.kind, reason = ?award.reason, "Bye");
        }

        if !pairing.infeasible.is_empty() {
            round.warnings.push(PairingWarning::InfeasiblePairing {
                pairs: pairing.infeasible.clone(),
            });
        }
        for &(a, b) in &pairing.rematches {
            round.warnings.push(PairingWarning::ForcedRematch { a, b });
        }
        if let Some(stats) = &pairing.stats {
            if stats.greedy_pairs > 0 {
                round.warnings.push(PairingWarning::TruncatedSearch {
                    pool: decision.pool.len(),
                    greedy_pairs: stats.greedy_pairs,
                });
            }
            if stats.interrupted {
                round.warnings.push(PairingWarning::SearchInterrupted);
            }
        }
        for warning in &round.warnings {
            warn!(round = number, "{}", warning);
        }

        round.total_badness = pairing.total_badness;
        round.advance(RoundState::PairingGenerated)?;
        // Results may be entered as soon as the pairing exists
        round.advance(RoundState::AwaitingResults)?;

        info!(
            round = number,
            system = %system,
            games = seats.len(),
            byes = awards.len(),
            badness = pairing.total_badness,
            "Round paired"
        );
        Ok(&*self.current.insert(round))
    }

    /// Enter the result of one board of the current round
    pub fn record_result(&mut self, board: u32, result: GameResult) -> Result<(), TournamentError> {
        let round = self.current.as_mut().ok_or(TournamentError::NoActiveRound)?;
        round.expect_state(RoundState::AwaitingResults)?;

        let game = round
            .matches
            .iter_mut()
            .find(|m| m.board == board)
            .ok_or(TournamentError::UnknownBoard(board))?;
        match game.result {
            MatchResult::Bye(_) => Err(TournamentError::ByeHasNoResult(board)),
            MatchResult::Played(_) => Err(TournamentError::ResultAlreadyRecorded(board)),
            MatchResult::Pending => {
                game.result = MatchResult::Played(result);
                info!(round = round.number, board, %result, "Result recorded");
                Ok(())
            }
        }
    }

    /// Close the current round and add its points to the standings
    pub fn complete_round(&mut self) -> Result<&Round, TournamentError> {
        let round = self.current.as_ref().ok_or(TournamentError::NoActiveRound)?;
        round.expect_state(RoundState::AwaitingResults)?;
        let pending = round.pending();
        if pending > 0 {
            return Err(TournamentError::PendingResults { pending });
        }

        let mut awards = Vec::with_capacity(round.matches.len() * 2);
        for m in &round.matches {
            let (white, black) = m.result.points();
            awards.push((m.white, white));
            if let Some(id) = m.black {
                awards.push((id, black));
            }
        }
        for (id, points) in awards {
            self.standings.add_points(id, points)?;
        }

        let mut round = self.current.take().ok_or(TournamentError::NoActiveRound)?;
        round.advance(RoundState::RoundComplete)?;
        info!(round = round.number, "Round complete");
        self.completed.push(round);
        self.completed.last().ok_or(TournamentError::NoActiveRound)
    }

    /// Save the full state as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), TournamentError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a saved state, validating its configuration and player table
    pub fn load(path: &Path) -> Result<Self, TournamentError> {
        let contents = std::fs::read_to_string(path)?;
        let tournament: Tournament = serde_json::from_str(&contents)?;
        tournament.config.validate()?;
        if !tournament.standings.is_consistent() {
            return Err(TournamentError::InconsistentStandings);
        }
        Ok(tournament)
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod orchestrator_tests;
