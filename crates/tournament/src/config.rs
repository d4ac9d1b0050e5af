//! Tournament configuration, loaded from TOML
//!
//! ```toml
//! name = "Club Championship"
//! rounds = 7
//!
//! [pairing]
//! rating_divisor = 100.0
//! match_ceiling = 500.0
//! acceptable_badness = 0.0
//! full_search_limit = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use swiss_core::{ConfigError, PairingConfig};

use crate::error::TournamentError;

/// Default number of rounds
pub const DEFAULT_ROUNDS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub name: String,
    pub rounds: u32,
    pub pairing: PairingConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: "Swiss Tournament".to_string(),
            rounds: DEFAULT_ROUNDS,
            pairing: PairingConfig::default(),
        }
    }
}

impl TournamentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::OutOfRange {
                field: "rounds",
                value: 0.0,
                expected: "at least 1",
            });
        }
        self.pairing.validate()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, TournamentError> {
        let config: TournamentConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, TournamentError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
