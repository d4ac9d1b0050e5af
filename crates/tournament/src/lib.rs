//! Swiss tournament runner
//!
//! This crate provides:
//! - The round state machine on top of the `swiss_core` pairing engine
//! - Result entry and standings updates
//! - JSON persistence and TOML configuration
//! - Text reports and a seeded simulator
//!
//! # Usage
//!
//! ```bash
//! # Start a tournament and register players
//! cargo run -p tournament -- --state club.json new --rounds 7
//! cargo run -p tournament -- --state club.json add-player "Alice" 1850
//!
//! # Pair, enter results, close the round
//! cargo run -p tournament -- --state club.json pair --system dutch
//! cargo run -p tournament -- --state club.json result 1 1-0
//! cargo run -p tournament -- --state club.json complete
//! ```

mod config;
mod error;
mod orchestrator;
mod report;
mod round;
mod simulate;

pub use config::*;
pub use error::*;
pub use orchestrator::*;
pub use report::*;
pub use round::*;
pub use simulate::*;
