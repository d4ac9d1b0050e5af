//! Pairwise badness matrix
//!
//! The cost of pairing two players is the sum of:
//! - a rematch penalty when they have already met,
//! - the rating gap divided by the configured divisor,
//! - a score-gap penalty (Monrad and Dutch),
//! - a same-half penalty when both come from the same half of the
//!   score-sorted pool (Dutch).
//!
//! A pair whose cost exceeds the single-match ceiling is infeasible.

use std::collections::HashSet;

use crate::config::PairingConfig;
use crate::player::{Player, PlayerId};

/// Optional cost terms switched on by the pairing system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PenaltyRules {
    pub score_gap: bool,
    pub same_half: bool,
}

/// Symmetric cost matrix over a pool given in priority order.
///
/// Index `i` refers to the `i`-th player of the pool; lower indices have
/// higher pairing priority.
#[derive(Debug, Clone)]
pub struct BadnessMatrix {
    ids: Vec<PlayerId>,
    costs: Vec<f64>,
    rematches: Vec<bool>,
    ceiling: f64,
}

impl BadnessMatrix {
    /// Compute the matrix for a pool that is already in priority order
    pub fn compute(pool: &[&Player], config: &PairingConfig, rules: PenaltyRules) -> Self {
        let n = pool.len();
        let half = n / 2;

        // Per-player opponent sets so each pair is checked in O(1)
        let met: Vec<HashSet<PlayerId>> = pool
            .iter()
            .map(|p| p.opponents.iter().copied().collect())
            .collect();

        let mut costs = vec![0.0; n * n];
        let mut rematches = vec![false; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (pool[i], pool[j]);
                let rematch = met[i].contains(&b.id) || met[j].contains(&a.id);

                let mut cost = a.rating.abs_diff(b.rating) as f64 / config.rating_divisor;
                if rematch {
                    cost += config.rematch_penalty;
                }
                if rules.score_gap {
                    cost += config.score_gap_penalty * (a.score - b.score).abs();
                }
                if rules.same_half && (i < half) == (j < half) {
                    cost += config.same_half_penalty;
                }

                costs[i * n + j] = cost;
                costs[j * n + i] = cost;
                rematches[i * n + j] = rematch;
                rematches[j * n + i] = rematch;
            }
        }

        Self {
            ids: pool.iter().map(|p| p.id).collect(),
            costs,
            rematches,
            ceiling: config.match_ceiling,
        }
    }

    /// Build a matrix from explicit costs. Only the upper triangle is read;
    /// the lower triangle is mirrored from it.
    pub fn from_costs(costs: &[Vec<f64>], ceiling: f64) -> Self {
        let n = costs.len();
        let mut flat = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                flat[i * n + j] = costs[i][j];
                flat[j * n + i] = costs[i][j];
            }
        }
        Self {
            ids: (0..n as u32).map(PlayerId).collect(),
            costs: flat,
            rematches: vec![false; n * n],
            ceiling,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn id(&self, index: usize) -> PlayerId {
        self.ids[index]
    }

    /// Cost of pairing `i` with `j`. The diagonal is meaningless.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert_ne!(i, j, "a player is never paired with themselves");
        self.costs[i * self.len() + j]
    }

    #[inline]
    pub fn is_feasible(&self, i: usize, j: usize) -> bool {
        self.get(i, j) <= self.ceiling
    }

    pub fn is_rematch(&self, i: usize, j: usize) -> bool {
        self.rematches[i * self.len() + j]
    }

    /// Sum of costs over a set of pairs
    pub fn total(&self, pairs: &[(usize, usize)]) -> f64 {
        pairs.iter().map(|&(i, j)| self.get(i, j)).sum()
    }
}

#[cfg(test)]
#[path = "badness_tests.rs"]
mod badness_tests;
