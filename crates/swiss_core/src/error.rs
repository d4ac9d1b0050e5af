//! Error types for configuration and pairing

use thiserror::Error;

use crate::player::PlayerId;

/// A configuration constant outside its valid range.
///
/// Raised when the configuration is validated, before any round runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Structural failures that abort pairing a round
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("not enough players to pair: {eligible} eligible after byes")]
    InsufficientPlayers { eligible: usize },
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("player {0} appears more than once in fixed pairings or byes")]
    DuplicateInFixedPairs(PlayerId),
    #[error("cannot pair an odd pool of {0} players")]
    OddPool(usize),
}

/// Unrecognized pairing system name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pairing system '{0}' (expected random, rating, monrad or dutch)")]
pub struct UnknownSystem(pub String);
