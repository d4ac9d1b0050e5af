//! Minimum-badness pairing search
//!
//! Recursive backtracking: take the highest-priority unpaired player, try
//! each remaining candidate in ascending badness, recurse on the rest.
//! Each call returns its own best completion and the caller keeps the
//! better one, so no search state is shared between branches.
//!
//! Pruning:
//! 1. Bound: a branch whose partial cost already reaches the best complete
//!    cost is abandoned.
//! 2. Ceiling: pairs above the single-match ceiling are skipped unless they
//!    are the only candidates left for the current player.
//! 3. Early exit: with `acceptable_badness > 0`, the first complete pairing
//!    at or below it ends the search.
//! 4. Large pools: above `full_search_limit` players, the highest-priority
//!    players are paired greedily and only the tail is searched exactly.
//!
//! Cost is compared lexicographically: fewer ceiling violations first, then
//! lower total badness. The violation count is always the minimum possible.
//! Because of rule 2, a player with a partner under the ceiling is never
//! paired above it, so when violations cannot be avoided the total badness
//! is minimal only among pairings that respect that restriction.

use std::cmp::Ordering;
use std::time::Instant;

use tracing::{debug, warn};

use crate::badness::BadnessMatrix;
use crate::budget::SearchBudget;
use crate::config::PairingConfig;
use crate::error::PairingError;
use crate::player::PlayerId;

/// Statistics and mode flags for one search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Recursive calls made
    pub nodes: u64,
    /// Pairs fixed by the greedy pass before the exact search
    pub greedy_pairs: usize,
    /// Stopped at a pairing within the acceptable badness
    pub early_exit: bool,
    /// Stopped by the budget after a complete pairing was found
    pub interrupted: bool,
}

impl SearchStats {
    /// Whether the result is guaranteed optimal
    pub fn exhaustive(&self) -> bool {
        self.greedy_pairs == 0 && !self.early_exit && !self.interrupted
    }
}

/// A complete pairing of the pool, in matrix indices
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Pairs as (higher priority, lower priority), ordered by the first index
    pub pairs: Vec<(usize, usize)>,
    /// Sum of the badness of every pair
    pub total: f64,
    /// Pairs above the single-match ceiling
    pub violations: Vec<(usize, usize)>,
    pub stats: SearchStats,
}

impl Assignment {
    /// No pair exceeds the ceiling
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }

    /// The pairs translated to player ids
    pub fn player_pairs(&self, matrix: &BadnessMatrix) -> Vec<(PlayerId, PlayerId)> {
        self.pairs
            .iter()
            .map(|&(i, j)| (matrix.id(i), matrix.id(j)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost {
    violations: u32,
    badness: f64,
}

impl Cost {
    const ZERO: Cost = Cost {
        violations: 0,
        badness: 0.0,
    };

    fn of_pair(matrix: &BadnessMatrix, i: usize, j: usize) -> Cost {
        Cost {
            violations: u32::from(!matrix.is_feasible(i, j)),
            badness: matrix.get(i, j),
        }
    }

    fn plus(self, other: Cost) -> Cost {
        Cost {
            violations: self.violations + other.violations,
            badness: self.badness + other.badness,
        }
    }

    fn cmp(&self, other: &Cost) -> Ordering {
        self.violations
            .cmp(&other.violations)
            .then_with(|| self.badness.total_cmp(&other.badness))
    }

    fn beats(&self, other: &Cost) -> bool {
        self.cmp(other) == Ordering::Less
    }
}

/// Best completion of a sub-pool
struct Branch {
    pairs: Vec<(usize, usize)>,
    cost: Cost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Halt {
    Running,
    EarlyExit,
    Interrupted,
}

struct Solver<'a> {
    matrix: &'a BadnessMatrix,
    acceptable: Option<f64>,
    budget: &'a SearchBudget,
    started: Instant,
    nodes: u64,
    complete_found: bool,
    halt: Halt,
}

impl Solver<'_> {
    /// Candidates for `player` in the order they are tried
    fn candidates(&self, player: usize, rest: &[usize]) -> Vec<usize> {
        let mut candidates: Vec<usize> = rest
            .iter()
            .copied()
            .filter(|&c| self.matrix.is_feasible(player, c))
            .collect();
        if candidates.is_empty() {
            // Last resort: only ceiling-breaking partners remain
            candidates = rest.to_vec();
        }
        candidates.sort_by(|&a, &b| {
            self.matrix
                .get(player, a)
                .total_cmp(&self.matrix.get(player, b))
                .then(a.cmp(&b))
        });
        candidates
    }

    fn should_halt(&mut self) -> bool {
        if self.halt != Halt::Running {
            return true;
        }
        if self.complete_found && self.budget.exhausted(self.started, self.nodes) {
            self.halt = Halt::Interrupted;
            return true;
        }
        false
    }

    /// Best completion of `remaining` (priority order) strictly better than
    /// `bound`, given `spent` already committed above this call.
    fn solve(&mut self, remaining: &[usize], spent: Cost, mut bound: Option<Cost>) -> Option<Branch> {
        self.nodes += 1;

        let Some((&player, rest)) = remaining.split_first() else {
            self.complete_found = true;
            return Some(Branch {
                pairs: Vec::new(),
                cost: Cost::ZERO,
            });
        };

        let mut best: Option<Branch> = None;
        for candidate in self.candidates(player, rest) {
            if self.should_halt() {
                break;
            }

            let pair_cost = Cost::of_pair(self.matrix, player, candidate);
            let reached = spent.plus(pair_cost);
            if let Some(limit) = bound {
                if !reached.beats(&limit) {
                    continue;
                }
            }

            let after: Vec<usize> = rest.iter().copied().filter(|&p| p != candidate).collect();
            let Some(mut sub) = self.solve(&after, reached, bound) else {
                continue;
            };

            let local = pair_cost.plus(sub.cost);
            let total = spent.plus(local);
            sub.pairs.insert(0, (player, candidate));
            sub.cost = local;
            bound = Some(total);
            best = Some(sub);

            if let Some(acceptable) = self.acceptable {
                if total.violations == 0 && total.badness <= acceptable {
                    self.halt = Halt::EarlyExit;
                }
            }
        }
        best
    }
}

/// Pair the cheapest available partner for each top-priority player until
/// only `keep` players remain. Feasible partners are preferred.
fn greedy_head(matrix: &BadnessMatrix, remaining: &mut Vec<usize>, keep: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    while remaining.len() > keep && remaining.len() >= 2 {
        let player = remaining.remove(0);
        let partner = remaining
            .iter()
            .copied()
            .min_by(|&a, &b| {
                Cost::of_pair(matrix, player, a)
                    .cmp(&Cost::of_pair(matrix, player, b))
                    .then(a.cmp(&b))
            })
            .unwrap_or(player);
        remaining.retain(|&p| p != partner);
        pairs.push((player, partner));
    }
    pairs
}

/// Find the pairing of the whole matrix pool with minimum badness.
///
/// The pool must be even. If every complete pairing needs a pair above the
/// ceiling, the least-bad one found is returned with its violations listed;
/// see [`Assignment::is_feasible`].
pub fn search(
    matrix: &BadnessMatrix,
    config: &PairingConfig,
    budget: &SearchBudget,
) -> Result<Assignment, PairingError> {
    let n = matrix.len();
    if n % 2 != 0 {
        return Err(PairingError::OddPool(n));
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut stats = SearchStats::default();

    let mut pairs = greedy_head(matrix, &mut remaining, config.full_search_limit);
    stats.greedy_pairs = pairs.len();
    if stats.greedy_pairs > 0 {
        warn!(
            pool = n,
            limit = config.full_search_limit,
            greedy_pairs = stats.greedy_pairs,
            "Pool exceeds full search limit, pairing top players greedily"
        );
    }

    let spent = pairs
        .iter()
        .fold(Cost::ZERO, |acc, &(i, j)| acc.plus(Cost::of_pair(matrix, i, j)));

    let mut solver = Solver {
        matrix,
        acceptable: config.early_exit_enabled().then_some(config.acceptable_badness),
        budget,
        started: Instant::now(),
        nodes: 0,
        complete_found: false,
        halt: Halt::Running,
    };

    match solver.solve(&remaining, spent, None) {
        Some(branch) => pairs.extend(branch.pairs),
        // Unreachable for an even pool, but never drop a player
        None => pairs.extend(greedy_head(matrix, &mut remaining, 0)),
    }

    stats.nodes = solver.nodes;
    stats.early_exit = solver.halt == Halt::EarlyExit;
    stats.interrupted = solver.halt == Halt::Interrupted;

    pairs.sort_unstable();
    let violations: Vec<(usize, usize)> = pairs
        .iter()
        .copied()
        .filter(|&(i, j)| !matrix.is_feasible(i, j))
        .collect();
    let total = matrix.total(&pairs);

    debug!(
        pool = n,
        nodes = stats.nodes,
        total,
        violations = violations.len(),
        early_exit = stats.early_exit,
        interrupted = stats.interrupted,
        "Pairing search finished"
    );

    Ok(Assignment {
        pairs,
        total,
        violations,
        stats,
    })
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
