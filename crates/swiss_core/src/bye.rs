//! Bye resolution
//!
//! Runs before pairing. Absent players each get a half bye. If the present
//! pool is still odd, the lowest-standing player who never had a full bye
//! gets one; when everybody already had theirs, that player gets a half bye
//! instead. Byes chosen by hand follow the same one-full-bye rule.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::player::{priority_order, Player, PlayerId};

/// Points for a regular bye
pub const FULL_BYE_POINTS: f64 = 1.0;

/// Points for a half bye
pub const HALF_BYE_POINTS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByeKind {
    /// Regular bye, at most once per player
    Full,
    /// Half bye, unlimited
    Half,
}

impl ByeKind {
    pub fn points(self) -> f64 {
        match self {
            ByeKind::Full => FULL_BYE_POINTS,
            ByeKind::Half => HALF_BYE_POINTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByeReason {
    /// Marked absent for the round
    Absent,
    /// Odd pool
    OddPool,
    /// Odd pool, but every candidate already used their full bye
    NoFullByeLeft,
    /// Chosen by the operator
    Assigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByeAward {
    pub player: PlayerId,
    pub kind: ByeKind,
    pub reason: ByeReason,
}

/// Who sits out, and who is left to pair
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ByeDecision {
    pub awards: Vec<ByeAward>,
    /// The pairing pool, in priority order. Always even.
    pub pool: Vec<PlayerId>,
}

impl ByeDecision {
    /// The regular bye granted this round, if any
    pub fn full_bye(&self) -> Option<PlayerId> {
        self.awards
            .iter()
            .find(|a| a.kind == ByeKind::Full)
            .map(|a| a.player)
    }
}

/// A bye chosen by the operator. It is the player's full bye unless they
/// already had one, in which case it drops to a half bye.
pub fn assign_bye(player: &Player) -> ByeAward {
    if player.had_full_bye {
        ByeAward {
            player: player.id,
            kind: ByeKind::Half,
            reason: ByeReason::NoFullByeLeft,
        }
    } else {
        ByeAward {
            player: player.id,
            kind: ByeKind::Full,
            reason: ByeReason::Assigned,
        }
    }
}

/// Lowest score first, then lowest rating, then lowest id
fn bye_order(a: &Player, b: &Player) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.rating.cmp(&b.rating))
        .then_with(|| a.id.cmp(&b.id))
}

/// Decide the byes for one round.
///
/// Pure: the caller applies the awards (bye flag, points) to the standings.
pub fn resolve_byes(candidates: &[&Player]) -> ByeDecision {
    let mut awards: Vec<ByeAward> = candidates
        .iter()
        .filter(|p| !p.present)
        .map(|p| ByeAward {
            player: p.id,
            kind: ByeKind::Half,
            reason: ByeReason::Absent,
        })
        .collect();

    let mut present: Vec<&Player> = candidates.iter().copied().filter(|p| p.present).collect();
    present.sort_by(|a, b| priority_order(a, b));

    if present.len() % 2 != 0 {
        let regular = present
            .iter()
            .filter(|p| !p.had_full_bye)
            .min_by(|a, b| bye_order(a, b))
            .map(|p| (p.id, ByeKind::Full, ByeReason::OddPool));
        let fallback = || {
            present
                .iter()
                .min_by(|a, b| bye_order(a, b))
                .map(|p| (p.id, ByeKind::Half, ByeReason::NoFullByeLeft))
        };

        if let Some((player, kind, reason)) = regular.or_else(fallback) {
            awards.push(ByeAward {
                player,
                kind,
                reason,
            });
            present.retain(|p| p.id != player);
        }
    }

    ByeDecision {
        awards,
        pool: present.iter().map(|p| p.id).collect(),
    }
}

#[cfg(test)]
#[path = "bye_tests.rs"]
mod bye_tests;
