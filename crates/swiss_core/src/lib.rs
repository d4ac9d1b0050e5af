//! Swiss-system pairing engine
//!
//! This crate holds everything needed to decide one round of a Swiss
//! tournament, without any I/O:
//! - Player records and the standings table
//! - The pairwise badness matrix
//! - Bye resolution (half byes for absentees, one regular bye per player)
//! - The minimum-badness search with pruning and early exit
//! - Color assignment from running color-balance counters
//!
//! Round sequencing, result entry and persistence live in the `tournament`
//! crate.

pub mod badness;
pub mod budget;
pub mod bye;
pub mod color;
pub mod config;
pub mod error;
pub mod player;
pub mod search;
pub mod system;

pub use badness::*;
pub use budget::*;
pub use bye::*;
pub use color::*;
pub use config::*;
pub use error::*;
pub use player::*;
pub use search::{search, Assignment, SearchStats};
pub use system::*;
