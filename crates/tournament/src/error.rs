//! Tournament errors

use swiss_core::{ConfigError, PairingError};
use thiserror::Error;

use crate::round::RoundState;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pairing(#[from] PairingError),
    #[error("round {round} is still in progress")]
    RoundInProgress { round: u32 },
    #[error("no round is in progress")]
    NoActiveRound,
    #[error("round {round} is {found:?}, expected {expected:?}")]
    InvalidState {
        round: u32,
        expected: RoundState,
        found: RoundState,
    },
    #[error("all {rounds} rounds have been played")]
    AllRoundsPlayed { rounds: u32 },
    #[error("no board {0} in the current round")]
    UnknownBoard(u32),
    #[error("board {0} is a bye and takes no result")]
    ByeHasNoResult(u32),
    #[error("board {0} already has a result")]
    ResultAlreadyRecorded(u32),
    #[error("{pending} result(s) still pending")]
    PendingResults { pending: usize },
    #[error("invalid result '{0}' (expected 1-0, 0-1 or 1/2-1/2)")]
    InvalidResult(String),
    #[error("saved standings are out of id order or reuse ids")]
    InconsistentStandings,
    #[error("failed to read or write state: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode or decode state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
