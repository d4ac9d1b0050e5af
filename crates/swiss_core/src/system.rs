//! Pairing systems
//!
//! `Random` and `ByRating` seat a round directly (typically round one).
//! `Monrad` and `Dutch` run the minimum-badness search over the matrix.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::badness::{BadnessMatrix, PenaltyRules};
use crate::budget::SearchBudget;
use crate::config::PairingConfig;
use crate::error::{PairingError, UnknownSystem};
use crate::player::{priority_order, Player, PlayerId};
use crate::search::{search, SearchStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PairingSystem {
    /// Seeded shuffle, consecutive players paired
    Random,
    /// Rating order, consecutive players paired
    ByRating,
    /// Minimum badness with rematch, rating and score-gap terms
    Monrad,
    /// Monrad plus the same-half penalty
    #[default]
    Dutch,
}

impl PairingSystem {
    pub fn rules(self) -> PenaltyRules {
        match self {
            PairingSystem::Random | PairingSystem::ByRating | PairingSystem::Monrad => {
                PenaltyRules {
                    score_gap: true,
                    same_half: false,
                }
            }
            PairingSystem::Dutch => PenaltyRules {
                score_gap: true,
                same_half: true,
            },
        }
    }

    /// Whether this system runs the badness search
    pub fn searches(self) -> bool {
        matches!(self, PairingSystem::Monrad | PairingSystem::Dutch)
    }
}

impl fmt::Display for PairingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PairingSystem::Random => "random",
            PairingSystem::ByRating => "rating",
            PairingSystem::Monrad => "monrad",
            PairingSystem::Dutch => "dutch",
        };
        f.write_str(name)
    }
}

impl FromStr for PairingSystem {
    type Err = UnknownSystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(PairingSystem::Random),
            "rating" | "by-rating" | "by rating" | "elo" | "by elo" => Ok(PairingSystem::ByRating),
            "monrad" => Ok(PairingSystem::Monrad),
            "dutch" | "swiss" => Ok(PairingSystem::Dutch),
            _ => Err(UnknownSystem(s.to_string())),
        }
    }
}

/// The pool's pairs before colors are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct PoolPairing {
    /// Higher-priority player first
    pub pairs: Vec<(PlayerId, PlayerId)>,
    pub total_badness: f64,
    /// Pairs above the single-match ceiling
    pub infeasible: Vec<(PlayerId, PlayerId)>,
    /// Pairs that already met
    pub rematches: Vec<(PlayerId, PlayerId)>,
    /// Present when the badness search ran
    pub stats: Option<SearchStats>,
}

fn consecutive(n: usize) -> Vec<(usize, usize)> {
    (0..n / 2).map(|k| (2 * k, 2 * k + 1)).collect()
}

/// Pair an even pool with the given system.
///
/// `round` perturbs the random seed so consecutive random rounds differ.
pub fn pair_pool(
    pool: &[&Player],
    system: PairingSystem,
    config: &PairingConfig,
    round: u32,
    budget: &SearchBudget,
) -> Result<PoolPairing, PairingError> {
    if pool.len() % 2 != 0 {
        return Err(PairingError::OddPool(pool.len()));
    }

    let mut ordered: Vec<&Player> = pool.to_vec();
    match system {
        PairingSystem::Random => {
            ordered.sort_by_key(|p| p.id);
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(u64::from(round)));
            ordered.shuffle(&mut rng);
        }
        PairingSystem::ByRating => {
            ordered.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        }
        PairingSystem::Monrad | PairingSystem::Dutch => {
            ordered.sort_by(|a, b| priority_order(a, b));
        }
    }

    let matrix = BadnessMatrix::compute(&ordered, config, system.rules());

    let (pairs, stats) = if system.searches() {
        let assignment = search(&matrix, config, budget)?;
        (assignment.pairs, Some(assignment.stats))
    } else {
        (consecutive(ordered.len()), None)
    };

    let ids = |&(i, j): &(usize, usize)| (matrix.id(i), matrix.id(j));
    Ok(PoolPairing {
        total_badness: matrix.total(&pairs),
        infeasible: pairs
            .iter()
            .filter(|&&(i, j)| !matrix.is_feasible(i, j))
            .map(ids)
            .collect(),
        rematches: pairs
            .iter()
            .filter(|&&(i, j)| matrix.is_rematch(i, j))
            .map(ids)
            .collect(),
        pairs: pairs.iter().map(ids).collect(),
        stats,
    })
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod system_tests;
