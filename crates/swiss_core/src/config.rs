//! Pairing configuration constants

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest pool the exhaustive search is allowed to take on in one piece
pub const MAX_FULL_SEARCH: usize = 24;

/// Default rematch penalty. Exceeds the default ceiling, so a rematch is
/// only ever chosen when no rematch-free pairing exists.
pub const DEFAULT_REMATCH_PENALTY: f64 = 1000.0;

/// Default single-match badness ceiling
pub const DEFAULT_MATCH_CEILING: f64 = 500.0;

/// Immutable configuration threaded into every pairing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// Added when the two players have already met
    pub rematch_penalty: f64,
    /// Rating gap is divided by this (larger = ratings matter less)
    pub rating_divisor: f64,
    /// Dutch only: both players from the same half of the score-sorted pool
    pub same_half_penalty: f64,
    /// Per point of score difference (Monrad and Dutch)
    pub score_gap_penalty: f64,
    /// A single pair above this is infeasible
    pub match_ceiling: f64,
    /// Stop searching once a complete pairing this good is found (0 = exact)
    pub acceptable_badness: f64,
    /// Pools larger than this are partly paired greedily
    pub full_search_limit: usize,
    /// Optional wall-clock limit for one search, in milliseconds
    pub time_limit_ms: Option<u64>,
    /// Seed for the random pairing system
    pub seed: u64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            rematch_penalty: DEFAULT_REMATCH_PENALTY,
            rating_divisor: 100.0,
            same_half_penalty: 3.0,
            score_gap_penalty: 10.0,
            match_ceiling: DEFAULT_MATCH_CEILING,
            acceptable_badness: 0.0,
            full_search_limit: 20,
            time_limit_ms: None,
            seed: 0,
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "a finite value >= 0",
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "a finite value > 0",
        })
    }
}

impl PairingConfig {
    /// Reject constants outside their valid range
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("rematch_penalty", self.rematch_penalty)?;
        positive("rating_divisor", self.rating_divisor)?;
        non_negative("same_half_penalty", self.same_half_penalty)?;
        non_negative("score_gap_penalty", self.score_gap_penalty)?;
        positive("match_ceiling", self.match_ceiling)?;
        non_negative("acceptable_badness", self.acceptable_badness)?;

        let limit = self.full_search_limit;
        if !(2..=MAX_FULL_SEARCH).contains(&limit) || limit % 2 != 0 {
            return Err(ConfigError::OutOfRange {
                field: "full_search_limit",
                value: limit as f64,
                expected: "an even number between 2 and 24",
            });
        }
        Ok(())
    }

    /// Whether the search may stop at the first good-enough pairing
    pub fn early_exit_enabled(&self) -> bool {
        self.acceptable_badness > 0.0
    }
}
