//! Rounds, matches and results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use swiss_core::{ByeKind, PairingSystem, PlayerId};

use crate::error::TournamentError;

/// Result of a played game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    /// Points for (white, black)
    pub fn points(self) -> (f64, f64) {
        match self {
            GameResult::WhiteWins => (1.0, 0.0),
            GameResult::BlackWins => (0.0, 1.0),
            GameResult::Draw => (0.5, 0.5),
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        };
        f.write_str(s)
    }
}

impl FromStr for GameResult {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match compact.as_str() {
            "1-0" => Ok(GameResult::WhiteWins),
            "0-1" => Ok(GameResult::BlackWins),
            "1/2-1/2" | "0.5-0.5" | "½-½" | "draw" => Ok(GameResult::Draw),
            _ => Err(TournamentError::InvalidResult(s.to_string())),
        }
    }
}

/// Result slot of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Pending,
    Played(GameResult),
    /// Byes are final from the moment they are created
    Bye(ByeKind),
}

impl MatchResult {
    pub fn is_pending(self) -> bool {
        self == MatchResult::Pending
    }

    /// Points for (white or bye recipient, black)
    pub fn points(self) -> (f64, f64) {
        match self {
            MatchResult::Pending => (0.0, 0.0),
            MatchResult::Played(result) => result.points(),
            MatchResult::Bye(kind) => (kind.points(), 0.0),
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Pending => f.write_str("-"),
            MatchResult::Played(result) => write!(f, "{}", result),
            MatchResult::Bye(ByeKind::Full) => f.write_str("bye (1)"),
            MatchResult::Bye(ByeKind::Half) => f.write_str("bye (1/2)"),
        }
    }
}

/// One board of a round. For a bye, `white` is the recipient and `black` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub round: u32,
    pub board: u32,
    pub white: PlayerId,
    pub black: Option<PlayerId>,
    pub result: MatchResult,
}

impl Match {
    pub fn game(round: u32, board: u32, white: PlayerId, black: PlayerId) -> Self {
        Self {
            round,
            board,
            white,
            black: Some(black),
            result: MatchResult::Pending,
        }
    }

    pub fn bye(round: u32, board: u32, player: PlayerId, kind: ByeKind) -> Self {
        Self {
            round,
            board,
            white: player,
            black: None,
            result: MatchResult::Bye(kind),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.black.is_none()
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.white == player || self.black == Some(player)
    }
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    AwaitingPairing,
    PairingGenerated,
    AwaitingResults,
    RoundComplete,
}

impl RoundState {
    /// The only state a round may enter this one from
    fn predecessor(self) -> Option<RoundState> {
        match self {
            RoundState::AwaitingPairing => None,
            RoundState::PairingGenerated => Some(RoundState::AwaitingPairing),
            RoundState::AwaitingResults => Some(RoundState::PairingGenerated),
            RoundState::RoundComplete => Some(RoundState::AwaitingResults),
        }
    }
}

/// Soft violations attached to a produced round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PairingWarning {
    /// No complete pairing stays under the single-match ceiling
    InfeasiblePairing { pairs: Vec<(PlayerId, PlayerId)> },
    ForcedRematch { a: PlayerId, b: PlayerId },
    /// The pool was too large for a full search
    TruncatedSearch { pool: usize, greedy_pairs: usize },
    /// The search budget ran out before the search finished
    SearchInterrupted,
    /// Every candidate already had a full bye
    HalfByeFallback { player: PlayerId },
}

impl fmt::Display for PairingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingWarning::InfeasiblePairing { pairs } => {
                write!(f, "{} pair(s) exceed the badness ceiling:", pairs.len())?;
                for (a, b) in pairs {
                    write!(f, " {}-{}", a, b)?;
                }
                Ok(())
            }
            PairingWarning::ForcedRematch { a, b } => write!(f, "rematch {} vs {}", a, b),
            PairingWarning::TruncatedSearch { pool, greedy_pairs } => write!(
                f,
                "pool of {} too large for full search, {} pair(s) chosen greedily",
                pool, greedy_pairs
            ),
            PairingWarning::SearchInterrupted => {
                f.write_str("search interrupted, best pairing so far used")
            }
            PairingWarning::HalfByeFallback { player } => write!(
                f,
                "{} gets a half bye: every candidate already had a full bye",
                player
            ),
        }
    }
}

/// One round of the tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub system: PairingSystem,
    pub state: RoundState,
    pub matches: Vec<Match>,
    pub warnings: Vec<PairingWarning>,
    /// Summed badness of the played pairs
    pub total_badness: f64,
}

impl Round {
    pub fn new(number: u32, system: PairingSystem) -> Self {
        Self {
            number,
            system,
            state: RoundState::AwaitingPairing,
            matches: Vec::new(),
            warnings: Vec::new(),
            total_badness: 0.0,
        }
    }

    /// Move to the next state, rejecting anything out of order
    pub fn advance(&mut self, next: RoundState) -> Result<(), TournamentError> {
        match next.predecessor() {
            Some(expected) if expected == self.state => {
                tracing::debug!(round = self.number, from = ?self.state, to = ?next, "Round state change");
                self.state = next;
                Ok(())
            }
            expected => Err(TournamentError::InvalidState {
                round: self.number,
                expected: expected.unwrap_or(RoundState::AwaitingPairing),
                found: self.state,
            }),
        }
    }

    pub fn expect_state(&self, expected: RoundState) -> Result<(), TournamentError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(TournamentError::InvalidState {
                round: self.number,
                expected,
                found: self.state,
            })
        }
    }

    /// Matches still waiting for a result
    pub fn pending(&self) -> usize {
        self.matches.iter().filter(|m| m.result.is_pending()).count()
    }

    pub fn games(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| !m.is_bye())
    }

    pub fn byes(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_bye())
    }

    pub fn board(&self, board: u32) -> Option<&Match> {
        self.matches.iter().find(|m| m.board == board)
    }

    pub fn match_for(&self, player: PlayerId) -> Option<&Match> {
        self.matches.iter().find(|m| m.involves(player))
    }
}

#[cfg(test)]
#[path = "round_tests.rs"]
mod round_tests;
